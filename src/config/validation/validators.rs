//! Section validators

use super::trait_def::Validate;
use crate::config::models::*;
use reqwest::Url;
use tracing::debug;

impl Validate for AwsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.account_attribute.trim().is_empty() {
            return Err("Directory account attribute cannot be empty".to_string());
        }

        if let Some(queue_url) = &self.queue_url {
            Url::parse(queue_url).map_err(|e| format!("Invalid queue URL '{}': {}", queue_url, e))?;
        }

        Ok(())
    }
}

impl Validate for StripeConfig {
    fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.api_base)
            .map_err(|e| format!("Invalid Stripe API base '{}': {}", self.api_base, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "Stripe API base must be http(s), got '{}'",
                url.scheme()
            ));
        }

        if self.timeout_secs == 0 {
            return Err("Stripe timeout must be greater than 0".to_string());
        }

        if matches!(&self.api_key, Some(key) if key.trim().is_empty()) {
            return Err("Stripe API key cannot be blank".to_string());
        }

        Ok(())
    }
}

impl Validate for PersistRetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("Persist max_attempts must be at least 1".to_string());
        }

        if self.backoff_multiplier < 1.0 {
            return Err("Persist backoff_multiplier must be at least 1.0".to_string());
        }

        if self.base_delay_ms > self.max_delay_ms {
            return Err(format!(
                "Persist base_delay_ms ({}) exceeds max_delay_ms ({})",
                self.base_delay_ms, self.max_delay_ms
            ));
        }

        Ok(())
    }
}

impl Validate for PipelineSettings {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating pipeline settings");

        if self.run_timeout_secs == Some(0) {
            return Err("Run timeout must be greater than 0".to_string());
        }

        if self.max_in_flight == Some(0) {
            return Err("max_in_flight must be greater than 0".to_string());
        }

        if self.record_sort_key.trim().is_empty() {
            return Err("Record sort key cannot be empty".to_string());
        }

        self.persist_retry.validate()
    }
}
