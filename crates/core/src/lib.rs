//! Domain types shared across the flowdeck workspace.
//!
//! Executor and workflow-definition records as reported by the engine
//! REST API, plus workflow retry settings. This crate has zero internal
//! deps so it can be used by the client, the poller, and any future
//! tooling.

pub mod definition;
pub mod executor;
pub mod settings;
pub mod types;
