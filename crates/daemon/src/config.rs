use std::time::Duration;

use anyhow::Context;

/// Daemon configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Base URL of the workflow engine's REST API.
    pub engine_url: String,
    /// Period between executor status fetches.
    pub executor_poll_period: Duration,
    /// Period between workflow definition catalog fetches.
    pub definition_poll_period: Duration,
}

impl DaemonConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                       | Required | Default |
    /// |-------------------------------|----------|---------|
    /// | `ENGINE_URL`                  | yes      | --      |
    /// | `EXECUTOR_POLL_PERIOD_SECS`   | no       | `30`    |
    /// | `DEFINITION_POLL_PERIOD_SECS` | no       | `60`    |
    pub fn from_env() -> anyhow::Result<Self> {
        let engine_url = std::env::var("ENGINE_URL")
            .context("ENGINE_URL environment variable is required")?;

        let executor_poll_period = env_period("EXECUTOR_POLL_PERIOD_SECS", 30)?;
        let definition_poll_period = env_period("DEFINITION_POLL_PERIOD_SECS", 60)?;

        Ok(Self {
            engine_url,
            executor_poll_period,
            definition_poll_period,
        })
    }
}

fn env_period(key: &str, default_secs: u64) -> anyhow::Result<Duration> {
    let secs: u64 = match std::env::var(key) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{key} must be a positive integer, got {value:?}"))?,
        Err(_) => default_secs,
    };
    Ok(Duration::from_secs(secs))
}
