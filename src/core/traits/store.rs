//! Key-value bulk write

use crate::core::models::CustomerRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Bulk writer for customer records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Write `records` in one request.
    ///
    /// Returns the records the store did not commit, in the same shape as
    /// the input. An empty vector means everything was written.
    async fn bulk_persist(&self, records: &[CustomerRecord]) -> Result<Vec<CustomerRecord>>;
}
