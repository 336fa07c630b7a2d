//! REST API client for the workflow engine's HTTP endpoints.

use serde::de::DeserializeOwned;

use flowdeck_core::definition::{DefinitionStats, WorkflowDefinition};
use flowdeck_core::executor::Executor;

/// HTTP client for a single workflow engine instance.
#[derive(Debug, Clone)]
pub struct EngineApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the engine REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum EngineApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The engine returned a non-2xx status code.
    #[error("engine API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl EngineApi {
    /// Create a new API client for a workflow engine.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://host:7500/api`. A
    ///   trailing slash is stripped so endpoint paths join cleanly.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across multiple engines).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    /// Base HTTP URL of the engine.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List all executors registered with the engine.
    ///
    /// Sends `GET /v1/workflow-executor`. Order is preserved as
    /// returned by the engine.
    pub async fn list_executors(&self) -> Result<Vec<Executor>, EngineApiError> {
        self.get("/v1/workflow-executor").await
    }

    /// List all workflow definitions registered with the engine.
    ///
    /// Sends `GET /v1/workflow-definition`.
    pub async fn list_definitions(&self) -> Result<Vec<WorkflowDefinition>, EngineApiError> {
        self.get("/v1/workflow-definition").await
    }

    /// Fetch per-state instance statistics for one workflow definition.
    ///
    /// Sends `GET /v1/statistics/workflow/{type}`.
    pub async fn definition_stats(
        &self,
        definition_type: &str,
    ) -> Result<DefinitionStats, EngineApiError> {
        self.get(&format!("/v1/statistics/workflow/{definition_type}"))
            .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, EngineApiError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(url = %url, "Engine API request");

        let response = self.client.get(url).send().await?;
        Self::parse_response(response).await
    }

    /// Check the HTTP status and deserialize the body, preserving the
    /// raw body text for error reporting on non-2xx responses.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, EngineApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn list_executors_parses_engine_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/workflow-executor")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"id": 1, "host": "a", "pid": 10, "executorGroup": "g",
                     "started": "2026-08-20T08:00:00Z",
                     "active": "2026-08-20T08:05:00Z",
                     "expires": "2026-08-20T08:20:00Z"},
                    {"id": 2, "host": "b", "pid": 20, "executorGroup": "g"}
                ]"#,
            )
            .create_async()
            .await;

        let api = EngineApi::new(server.url());
        let executors = api.list_executors().await.expect("request should succeed");

        mock.assert_async().await;
        assert_eq!(executors.len(), 2);
        assert_eq!(executors[0].id, 1);
        assert_eq!(executors[1].host, "b");
        assert_eq!(executors[1].expires, None);
    }

    #[tokio::test]
    async fn non_success_status_maps_to_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/workflow-definition")
            .with_status(503)
            .with_body("engine unavailable")
            .create_async()
            .await;

        let api = EngineApi::new(server.url());
        let err = api.list_definitions().await.expect_err("should fail");

        assert_matches!(
            err,
            EngineApiError::Api { status: 503, ref body } if body == "engine unavailable"
        );
    }

    #[tokio::test]
    async fn definition_stats_hits_per_type_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/statistics/workflow/creditDecision")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"stateStatistics": {"decision": {"inProgress": 2}}}"#)
            .create_async()
            .await;

        let api = EngineApi::new(server.url());
        let stats = api
            .definition_stats("creditDecision")
            .await
            .expect("request should succeed");

        mock.assert_async().await;
        assert_eq!(stats.active_instances(), 2);
    }

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let api = EngineApi::new("http://engine:7500/api/");
        assert_eq!(api.base_url(), "http://engine:7500/api");
    }
}
