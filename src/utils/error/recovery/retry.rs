//! Exponential backoff

use super::types::RetryConfig;
use std::time::Duration;

/// Stateful exponential backoff derived from a [`RetryConfig`].
///
/// Each call to [`Backoff::next_delay`] returns the delay to sleep before the
/// next submission and advances the schedule, capped at `max_delay`.
#[derive(Debug, Clone)]
pub struct Backoff {
    config: RetryConfig,
    current: Duration,
}

impl Backoff {
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            config: config.clone(),
            current: config.base_delay,
        }
    }

    /// Submission budget, never below one
    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts.max(1)
    }

    pub fn next_delay(&mut self) -> Duration {
        let delay = std::cmp::min(self.current, self.config.max_delay);

        self.current = std::cmp::min(
            Duration::from_millis(
                (self.current.as_millis() as f64 * self.config.backoff_multiplier) as u64,
            ),
            self.config.max_delay,
        );

        if self.config.jitter && !delay.is_zero() {
            let jitter_factor = 0.1;
            let jitter =
                delay.as_millis() as f64 * jitter_factor * (rand::random::<f64>() - 0.5);
            Duration::from_millis((delay.as_millis() as f64 + jitter).max(0.0) as u64)
        } else {
            delay
        }
    }
}
