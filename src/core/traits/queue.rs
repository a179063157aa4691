//! Source queue

use crate::core::models::{AckEntry, FailedEntry, InboundMessage};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Acknowledges processed messages
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueApi: Send + Sync {
    /// Delete `entries` in one request; returns the entries the queue refused
    async fn bulk_acknowledge(&self, entries: &[AckEntry]) -> Result<Vec<FailedEntry>>;
}

/// Pulls message batches, for running outside a push-based event source
#[async_trait]
pub trait MessageSource: Send + Sync {
    async fn receive(&self, max_messages: usize, wait: Duration) -> Result<Vec<InboundMessage>>;
}
