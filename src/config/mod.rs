//! Configuration management
//!
//! This module handles loading, validation, and access to all runtime
//! configuration. Settings come from an optional YAML file and the process
//! environment, the environment taking precedence.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{QUEUE_URL_VAR, STRIPE_API_KEY_VAR, TABLE_NAME_VAR, USER_POOL_ID_VAR};
pub use models::*;
pub use validation::Validate;

use crate::utils::error::{OnboardingError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub aws: AwsConfig,
    pub stripe: StripeConfig,
    pub pipeline: PipelineSettings,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| OnboardingError::config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| OnboardingError::config(format!("Failed to parse config: {}", e)))?;

        debug!("Configuration file parsed");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::default().apply_env(|name| std::env::var(name).ok())
    }

    /// Load the optional file, overlay the environment and validate
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };

        let config = base.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration.
    ///
    /// Every missing required setting is reported in one error.
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        let missing: Vec<&str> = [
            (TABLE_NAME_VAR, self.aws.table_name.is_none()),
            (USER_POOL_ID_VAR, self.aws.user_pool_id.is_none()),
            (QUEUE_URL_VAR, self.aws.queue_url.is_none()),
            (STRIPE_API_KEY_VAR, self.stripe.api_key.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        if !missing.is_empty() {
            return Err(OnboardingError::config(format!(
                "Required settings are not set: {}",
                missing.join(", ")
            )));
        }

        self.aws
            .validate()
            .map_err(|e| OnboardingError::config(format!("AWS config error: {}", e)))?;
        self.stripe
            .validate()
            .map_err(|e| OnboardingError::config(format!("Stripe config error: {}", e)))?;
        self.pipeline
            .validate()
            .map_err(|e| OnboardingError::config(format!("Pipeline config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    pub fn table_name(&self) -> Result<&str> {
        required(&self.aws.table_name, TABLE_NAME_VAR)
    }

    pub fn user_pool_id(&self) -> Result<&str> {
        required(&self.aws.user_pool_id, USER_POOL_ID_VAR)
    }

    pub fn queue_url(&self) -> Result<&str> {
        required(&self.aws.queue_url, QUEUE_URL_VAR)
    }

    pub fn stripe_api_key(&self) -> Result<&str> {
        required(&self.stripe.api_key, STRIPE_API_KEY_VAR)
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| OnboardingError::config(format!("Environment variable {} is not set", name)))
}
