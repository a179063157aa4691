//! Pipeline tuning

use super::*;
use crate::utils::error::{OnboardingError, RetryConfig};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// What to do with a message whose body does not decode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Fail the whole batch before any external call
    #[default]
    Abort,
    /// Log the message, leave it unacknowledged and process the rest
    Skip,
}

impl FromStr for MalformedPolicy {
    type Err = OnboardingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(OnboardingError::config(format!(
                "Invalid malformed policy '{}', expected 'abort' or 'skip'",
                other
            ))),
        }
    }
}

/// Bounds for the bulk-write remainder loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistRetryConfig {
    /// Submissions per chunk, the first one included
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for PersistRetryConfig {
    fn default() -> Self {
        let retry = RetryConfig::default();
        Self {
            max_attempts: retry.max_attempts,
            base_delay_ms: retry.base_delay.as_millis() as u64,
            max_delay_ms: retry.max_delay.as_millis() as u64,
            backoff_multiplier: retry.backoff_multiplier,
            jitter: retry.jitter,
        }
    }
}

impl PersistRetryConfig {
    pub fn to_retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            backoff_multiplier: self.backoff_multiplier,
            jitter: self.jitter,
        }
    }
}

/// Pipeline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Execution budget of one run in seconds; workers still running when it
    /// runs out fail with a deadline error
    pub run_timeout_secs: Option<u64>,
    /// Cap on concurrently running workers per stage
    pub max_in_flight: Option<usize>,
    pub malformed_policy: MalformedPolicy,
    /// Sort key written with every customer record
    pub record_sort_key: String,
    pub persist_retry: PersistRetryConfig,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            run_timeout_secs: None,
            max_in_flight: None,
            malformed_policy: MalformedPolicy::default(),
            record_sort_key: default_sort_key(),
            persist_retry: PersistRetryConfig::default(),
        }
    }
}

impl PipelineSettings {
    pub fn run_timeout(&self) -> Option<Duration> {
        self.run_timeout_secs.map(Duration::from_secs)
    }
}
