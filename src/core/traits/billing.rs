//! Billing account creation

use crate::utils::error::Result;
use async_trait::async_trait;

/// Creates customer accounts at the billing provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BillingApi: Send + Sync {
    /// Create an account and return its identifier
    async fn create_account(&self, email: &str, full_name: &str) -> Result<String>;
}
