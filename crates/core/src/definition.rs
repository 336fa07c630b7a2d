//! Workflow definition and statistics records from the engine's
//! `/v1/workflow-definition` and `/v1/statistics/workflow/{type}`
//! resources.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A workflow definition registered with the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    /// Definition type, unique within the engine (e.g. `creditDecision`).
    #[serde(rename = "type")]
    pub definition_type: String,
    /// Human-readable description shown on the dashboard landing page.
    pub description: Option<String>,
    /// State reached when normal error handling gives up.
    pub on_error: Option<String>,
    /// States of the definition's state machine.
    #[serde(default)]
    pub states: Vec<DefinitionState>,
}

/// One state in a workflow definition's state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionState {
    /// State identifier, unique within the definition.
    pub id: String,
    /// State kind as reported by the engine (`start`, `normal`, `manual`,
    /// `end`).
    #[serde(rename = "type")]
    pub state_type: String,
    pub description: Option<String>,
    /// IDs of states reachable from this one.
    #[serde(default)]
    pub transitions: Vec<String>,
}

/// Per-state instance counts for one workflow definition.
///
/// Keyed by state id; the engine omits states with no instances, so a
/// missing key means zero everywhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionStats {
    #[serde(default, rename = "stateStatistics")]
    pub state_statistics: HashMap<String, StateStats>,
}

/// Instance counts for a single state, bucketed by instance status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StateStats {
    pub created: u64,
    pub in_progress: u64,
    pub executing: u64,
    pub manual: u64,
    pub finished: u64,
}

impl DefinitionStats {
    /// Total number of instances currently in non-finished buckets,
    /// summed over all states.
    pub fn active_instances(&self) -> u64 {
        self.state_statistics
            .values()
            .map(|s| s.created + s.in_progress + s.executing + s.manual)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_deserializes_from_engine_json() {
        let json = r#"{
            "type": "creditDecision",
            "description": "Approve or reject credit applications",
            "onError": "error",
            "states": [
                {"id": "start", "type": "start", "transitions": ["decision"]},
                {"id": "decision", "type": "normal", "transitions": ["done", "error"]},
                {"id": "done", "type": "end"},
                {"id": "error", "type": "manual"}
            ]
        }"#;

        let definition: WorkflowDefinition =
            serde_json::from_str(json).expect("valid definition JSON");
        assert_eq!(definition.definition_type, "creditDecision");
        assert_eq!(definition.states.len(), 4);
        assert_eq!(definition.states[1].transitions, vec!["done", "error"]);
        assert_eq!(definition.states[2].transitions, Vec::<String>::new());
    }

    #[test]
    fn stats_missing_states_count_as_zero() {
        let stats: DefinitionStats = serde_json::from_str("{}").expect("valid stats JSON");
        assert_eq!(stats.active_instances(), 0);
    }

    #[test]
    fn active_instances_excludes_finished() {
        let json = r#"{
            "stateStatistics": {
                "decision": {"created": 2, "inProgress": 3, "executing": 1, "finished": 100},
                "error": {"manual": 4, "finished": 7}
            }
        }"#;

        let stats: DefinitionStats = serde_json::from_str(json).expect("valid stats JSON");
        assert_eq!(stats.active_instances(), 10);
    }
}
