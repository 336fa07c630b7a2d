//! Periodic status polling for the dashboard.
//!
//! The engine API is plain request/response with no server push, so
//! fresh data has to be pulled. [`StatusPoller`] owns a shared
//! [`Snapshot`] collection and replaces its contents on a fixed period;
//! consumers keep one `Snapshot` handle and observe every refresh
//! without re-subscribing.

pub mod poller;
pub mod sources;

pub use poller::{PollerError, Snapshot, SnapshotSource, StatusPoller};
pub use sources::{DefinitionPoller, DefinitionSource, ExecutorPoller, ExecutorSource};
