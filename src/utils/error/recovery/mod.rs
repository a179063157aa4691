//! Error recovery utilities
//!
//! Backoff policy for resubmitting bulk-write remainders.

mod retry;
mod types;

pub use retry::Backoff;
pub use types::RetryConfig;
