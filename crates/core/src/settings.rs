//! Workflow execution settings.
//!
//! Controls retry timing for workflow state transitions: failed state
//! executions are retried with a binary backoff between a minimum and
//! maximum delay, up to a retry limit.

use std::time::Duration;

use chrono::Utc;

use crate::types::Timestamp;

/// Retry and transition-delay settings for workflow execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    /// Smallest delay before retrying a failed state transition.
    pub min_error_transition_delay: Duration,
    /// Backoff ceiling for failed state transitions.
    pub max_error_transition_delay: Duration,
    /// Delay applied when the engine detects a busy loop.
    pub short_transition_delay: Duration,
    /// Delay for transitions scheduled to run immediately.
    pub immediate_transition_delay: Duration,
    /// Maximum number of retry attempts before giving up.
    pub max_retries: u32,
}

impl WorkflowSettings {
    /// Builder initialised with default values.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Delay before the retry attempt numbered `retry_count` (0-based).
    ///
    /// Binary backoff: `min_delay * 2^(retry_count + 1)`, capped at
    /// `max_error_transition_delay`. Saturates instead of overflowing
    /// for large retry counts.
    pub fn error_transition_delay(&self, retry_count: u32) -> Duration {
        let factor = 1u64
            .checked_shl(retry_count.saturating_add(1))
            .unwrap_or(u64::MAX);
        let millis =
            (self.min_error_transition_delay.as_millis().min(u64::MAX as u128) as u64)
                .saturating_mul(factor);
        Duration::from_millis(millis).min(self.max_error_transition_delay)
    }

    /// Next activation time after a failed state execution.
    pub fn error_transition_activation(&self, retry_count: u32) -> Timestamp {
        Utc::now() + to_chrono(self.error_transition_delay(retry_count))
    }

    /// Next activation time after detecting a busy loop.
    pub fn short_transition_activation(&self) -> Timestamp {
        Utc::now() + to_chrono(self.short_transition_delay)
    }
}

fn to_chrono(duration: Duration) -> chrono::Duration {
    chrono::Duration::milliseconds(duration.as_millis().min(i64::MAX as u128) as i64)
}

/// Builder for [`WorkflowSettings`].
#[derive(Debug, Clone)]
pub struct Builder {
    min_error_transition_delay: Duration,
    max_error_transition_delay: Duration,
    short_transition_delay: Duration,
    immediate_transition_delay: Duration,
    max_retries: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            min_error_transition_delay: Duration::from_secs(60),
            max_error_transition_delay: Duration::from_secs(60 * 60 * 24),
            short_transition_delay: Duration::from_secs(30),
            immediate_transition_delay: Duration::ZERO,
            max_retries: 17,
        }
    }
}

impl Builder {
    /// Builder with defaults overridden from the environment.
    ///
    /// | Env Var                                  | Default    |
    /// |------------------------------------------|------------|
    /// | `FLOWDECK_TRANSITION_DELAY_ERROR_MIN_MS` | `60000`    |
    /// | `FLOWDECK_TRANSITION_DELAY_ERROR_MAX_MS` | `86400000` |
    /// | `FLOWDECK_TRANSITION_DELAY_SHORT_MS`     | `30000`    |
    /// | `FLOWDECK_TRANSITION_DELAY_IMMEDIATE_MS` | `0`        |
    /// | `FLOWDECK_MAX_STATE_RETRIES`             | `17`       |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_error_transition_delay: env_millis(
                "FLOWDECK_TRANSITION_DELAY_ERROR_MIN_MS",
                defaults.min_error_transition_delay,
            ),
            max_error_transition_delay: env_millis(
                "FLOWDECK_TRANSITION_DELAY_ERROR_MAX_MS",
                defaults.max_error_transition_delay,
            ),
            short_transition_delay: env_millis(
                "FLOWDECK_TRANSITION_DELAY_SHORT_MS",
                defaults.short_transition_delay,
            ),
            immediate_transition_delay: env_millis(
                "FLOWDECK_TRANSITION_DELAY_IMMEDIATE_MS",
                defaults.immediate_transition_delay,
            ),
            max_retries: std::env::var("FLOWDECK_MAX_STATE_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_retries),
        }
    }

    pub fn min_error_transition_delay(mut self, delay: Duration) -> Self {
        self.min_error_transition_delay = delay;
        self
    }

    pub fn max_error_transition_delay(mut self, delay: Duration) -> Self {
        self.max_error_transition_delay = delay;
        self
    }

    pub fn short_transition_delay(mut self, delay: Duration) -> Self {
        self.short_transition_delay = delay;
        self
    }

    pub fn immediate_transition_delay(mut self, delay: Duration) -> Self {
        self.immediate_transition_delay = delay;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn build(self) -> WorkflowSettings {
        WorkflowSettings {
            min_error_transition_delay: self.min_error_transition_delay,
            max_error_transition_delay: self.max_error_transition_delay,
            short_transition_delay: self.short_transition_delay,
            immediate_transition_delay: self.immediate_transition_delay,
            max_retries: self.max_retries,
        }
    }
}

fn env_millis(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}
