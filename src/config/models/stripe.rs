//! Billing provider configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stripe API settings
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct StripeConfig {
    /// Secret API key
    pub api_key: Option<String>,
    /// API base URL
    #[serde(default = "default_stripe_api_base")]
    pub api_base: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_stripe_api_base(),
            timeout_secs: default_timeout(),
        }
    }
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
