//! Executor records reported by the engine's `/v1/workflow-executor`
//! resource.
//!
//! An executor is one engine process dispatching workflow instances.
//! The dashboard only displays these records; every field is passed
//! through from the engine untouched.

use serde::{Deserialize, Serialize};

use crate::types::{EngineId, Timestamp};

/// One workflow executor instance registered with the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Executor {
    /// Engine-assigned executor ID.
    pub id: EngineId,
    /// Hostname of the machine running the executor.
    pub host: String,
    /// OS process ID of the executor.
    pub pid: i32,
    /// Executor group this process dispatches for.
    pub executor_group: String,
    /// When the executor process started.
    pub started: Option<Timestamp>,
    /// Last time the executor reported itself alive.
    pub active: Option<Timestamp>,
    /// Deadline after which the executor is considered dead unless it
    /// reports in again.
    pub expires: Option<Timestamp>,
}

impl Executor {
    /// Whether this executor's liveness lease is still valid at `now`.
    ///
    /// An executor with no `expires` timestamp has never activated and
    /// is not considered alive.
    pub fn is_alive(&self, now: Timestamp) -> bool {
        self.expires.is_some_and(|expires| expires > now)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn executor(expires: Option<Timestamp>) -> Executor {
        Executor {
            id: 1,
            host: "worker-1".into(),
            pid: 4242,
            executor_group: "flowdeck".into(),
            started: Some(Utc::now() - Duration::hours(1)),
            active: Some(Utc::now()),
            expires,
        }
    }

    #[test]
    fn executor_with_future_expiry_is_alive() {
        let now = Utc::now();
        assert!(executor(Some(now + Duration::minutes(5))).is_alive(now));
    }

    #[test]
    fn executor_with_past_expiry_is_dead() {
        let now = Utc::now();
        assert!(!executor(Some(now - Duration::minutes(5))).is_alive(now));
    }

    #[test]
    fn executor_without_expiry_is_dead() {
        assert!(!executor(None).is_alive(Utc::now()));
    }

    #[test]
    fn executor_deserializes_from_engine_json() {
        let json = r#"{
            "id": 7,
            "host": "nflow-01.example.org",
            "pid": 1337,
            "executorGroup": "billing",
            "started": "2026-08-20T08:00:00Z",
            "active": "2026-08-20T08:05:00Z",
            "expires": "2026-08-20T08:20:00Z"
        }"#;

        let executor: Executor = serde_json::from_str(json).expect("valid executor JSON");
        assert_eq!(executor.id, 7);
        assert_eq!(executor.executor_group, "billing");
        assert!(executor.expires.is_some());
    }

    #[test]
    fn executor_tolerates_missing_timestamps() {
        // A freshly registered executor may not have activated yet.
        let json = r#"{"id": 8, "host": "h", "pid": 1, "executorGroup": "g"}"#;

        let executor: Executor = serde_json::from_str(json).expect("valid executor JSON");
        assert_eq!(executor.started, None);
        assert_eq!(executor.active, None);
        assert_eq!(executor.expires, None);
    }
}
