//! Typed REST client for the workflow engine's HTTP API.
//!
//! Wraps the engine's executor, definition, and statistics resources
//! using [`reqwest`]. The engine exposes plain request/response
//! endpoints only (no server push), which is why the dashboard polls.

pub mod api;

pub use api::{EngineApi, EngineApiError};
