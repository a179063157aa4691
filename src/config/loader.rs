//! Configuration loading from environment variables

use super::Config;
use super::models::MalformedPolicy;
use crate::utils::error::{OnboardingError, Result};
use std::str::FromStr;
use tracing::debug;

pub const TABLE_NAME_VAR: &str = "DYNAMODB_TABLE_NAME";
pub const USER_POOL_ID_VAR: &str = "USER_POOL_ID";
pub const QUEUE_URL_VAR: &str = "SQS_QUEUE_URL";
pub const STRIPE_API_KEY_VAR: &str = "STRIPE_API_KEY";

impl Config {
    /// Override settings with the variables `lookup` knows about.
    ///
    /// Unset variables leave the current value alone, so file values survive
    /// unless the environment says otherwise.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Loading configuration from environment variables");

        // Required resources
        if let Some(table_name) = lookup(TABLE_NAME_VAR) {
            self.aws.table_name = Some(table_name);
        }
        if let Some(user_pool_id) = lookup(USER_POOL_ID_VAR) {
            self.aws.user_pool_id = Some(user_pool_id);
        }
        if let Some(queue_url) = lookup(QUEUE_URL_VAR) {
            self.aws.queue_url = Some(queue_url);
        }
        if let Some(api_key) = lookup(STRIPE_API_KEY_VAR) {
            self.stripe.api_key = Some(api_key);
        }

        // Optional settings
        if let Some(region) = lookup("AWS_REGION") {
            self.aws.region = Some(region);
        }
        if let Some(attribute) = lookup("COGNITO_ACCOUNT_ATTRIBUTE") {
            self.aws.account_attribute = attribute;
        }
        if let Some(api_base) = lookup("STRIPE_API_BASE") {
            self.stripe.api_base = api_base;
        }
        if let Some(timeout) = lookup("STRIPE_TIMEOUT_SECS") {
            self.stripe.timeout_secs = parse_var("STRIPE_TIMEOUT_SECS", &timeout)?;
        }

        // Pipeline tuning
        if let Some(timeout) = lookup("ONBOARDING_RUN_TIMEOUT_SECS") {
            self.pipeline.run_timeout_secs =
                Some(parse_var("ONBOARDING_RUN_TIMEOUT_SECS", &timeout)?);
        }
        if let Some(max_in_flight) = lookup("ONBOARDING_MAX_IN_FLIGHT") {
            self.pipeline.max_in_flight =
                Some(parse_var("ONBOARDING_MAX_IN_FLIGHT", &max_in_flight)?);
        }
        if let Some(policy) = lookup("ONBOARDING_MALFORMED_POLICY") {
            self.pipeline.malformed_policy = MalformedPolicy::from_str(&policy)?;
        }
        if let Some(sort_key) = lookup("ONBOARDING_RECORD_SORT_KEY") {
            self.pipeline.record_sort_key = sort_key;
        }
        if let Some(attempts) = lookup("ONBOARDING_PERSIST_MAX_ATTEMPTS") {
            self.pipeline.persist_retry.max_attempts =
                parse_var("ONBOARDING_PERSIST_MAX_ATTEMPTS", &attempts)?;
        }

        debug!("Configuration loaded from environment variables");
        Ok(self)
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| OnboardingError::config(format!("Invalid {}: {}", name, e)))
}
