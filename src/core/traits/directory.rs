//! Identity directory attribute update

use crate::utils::error::Result;
use async_trait::async_trait;

/// Writes the billing account id onto a directory user
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn update_attribute(&self, user_id: &str, value: &str) -> Result<()>;
}
