//! `flowdeckd` -- dashboard data daemon for a workflow engine.
//!
//! Polls the engine's REST API for executor status and the workflow
//! definition catalog, keeping shared snapshots fresh for dashboard
//! consumers. All wiring is explicit: collaborators are constructed
//! here and handed to the pollers, with no ambient registries.
//!
//! # Environment variables
//!
//! | Variable                      | Required | Default | Description                          |
//! |-------------------------------|----------|---------|--------------------------------------|
//! | `ENGINE_URL`                  | yes      | --      | Engine REST base URL, e.g. `http://host:7500/api` |
//! | `EXECUTOR_POLL_PERIOD_SECS`   | no       | `30`    | Seconds between executor fetches     |
//! | `DEFINITION_POLL_PERIOD_SECS` | no       | `60`    | Seconds between definition fetches   |

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flowdeck_client::EngineApi;
use flowdeck_poller::{DefinitionSource, ExecutorSource, StatusPoller};

use crate::config::DaemonConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DaemonConfig::from_env()?;

    tracing::info!(
        engine_url = %config.engine_url,
        executor_poll_secs = config.executor_poll_period.as_secs(),
        definition_poll_secs = config.definition_poll_period.as_secs(),
        "Starting flowdeckd",
    );

    let api = Arc::new(EngineApi::new(config.engine_url));

    let executors = Arc::new(StatusPoller::new(
        "executors",
        ExecutorSource::new(Arc::clone(&api)),
        config.executor_poll_period,
    ));
    let definitions = Arc::new(StatusPoller::new(
        "definitions",
        DefinitionSource::new(api),
        config.definition_poll_period,
    ));

    executors.start()?;
    definitions.start()?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    tracing::info!("Shutdown signal received");
    executors.stop();
    definitions.stop();

    Ok(())
}
