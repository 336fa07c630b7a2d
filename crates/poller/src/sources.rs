//! Snapshot sources backed by the engine REST API.

use std::sync::Arc;

use async_trait::async_trait;

use flowdeck_client::{EngineApi, EngineApiError};
use flowdeck_core::definition::WorkflowDefinition;
use flowdeck_core::executor::Executor;

use crate::poller::{SnapshotSource, StatusPoller};

/// Polls the engine's executor list.
pub type ExecutorPoller = StatusPoller<ExecutorSource>;

/// Polls the engine's workflow definition list.
pub type DefinitionPoller = StatusPoller<DefinitionSource>;

/// Fetches executor status from `GET /v1/workflow-executor`.
pub struct ExecutorSource {
    api: Arc<EngineApi>,
}

impl ExecutorSource {
    pub fn new(api: Arc<EngineApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SnapshotSource for ExecutorSource {
    type Item = Executor;
    type Error = EngineApiError;

    async fn fetch(&self) -> Result<Vec<Executor>, EngineApiError> {
        self.api.list_executors().await
    }
}

/// Fetches the workflow definition catalog from
/// `GET /v1/workflow-definition` for the dashboard landing page.
pub struct DefinitionSource {
    api: Arc<EngineApi>,
}

impl DefinitionSource {
    pub fn new(api: Arc<EngineApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SnapshotSource for DefinitionSource {
    type Item = WorkflowDefinition;
    type Error = EngineApiError;

    async fn fetch(&self) -> Result<Vec<WorkflowDefinition>, EngineApiError> {
        self.api.list_definitions().await
    }
}
