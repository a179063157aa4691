//! Unprocessed-remainder loop for one bulk-write chunk

use crate::core::batch::{Labeled, TaskResult};
use crate::core::models::CustomerRecord;
use crate::core::traits::RecordStore;
use crate::utils::error::{Backoff, OnboardingError, RetryConfig};
use std::future::Future;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Outcome of a fully committed chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistReport {
    /// Records written
    pub committed: usize,
    /// Bulk-write calls issued, the first one included
    pub submissions: u32,
}

/// Write `chunk`, resubmitting only what the store reports as unprocessed.
///
/// A failed call reports every record of the payload that call carried, so
/// after the first submission only the outstanding remainder is blamed.
/// Gives up with [`OnboardingError::UnprocessedRemainder`] once
/// `retry.max_attempts` submissions still leave records behind.
///
/// Past `deadline`, an in-flight submission or backoff wait is abandoned and
/// only the records still pending at that point are reported.
pub async fn persist_chunk(
    store: &dyn RecordStore,
    chunk: Vec<CustomerRecord>,
    retry: &RetryConfig,
    deadline: Option<Instant>,
) -> TaskResult<PersistReport> {
    let total = chunk.len();
    let mut backoff = Backoff::new(retry);
    let mut pending = chunk;
    let mut submissions = 0u32;

    loop {
        submissions += 1;

        let remainder = match before(deadline, store.bulk_persist(&pending)).await {
            Some(Ok(remainder)) => remainder,
            Some(Err(error)) => return TaskResult::failure(error, pending.labels()),
            None => return expired(&pending, total, submissions),
        };

        if remainder.is_empty() {
            debug!(records = total, submissions, "Chunk persisted");
            return TaskResult::Success(PersistReport {
                committed: total,
                submissions,
            });
        }

        if submissions >= backoff.max_attempts() {
            let message = format!(
                "{} of {} records still unprocessed after {} submissions",
                remainder.len(),
                total,
                submissions
            );
            return TaskResult::failure(
                OnboardingError::UnprocessedRemainder(message),
                remainder.labels(),
            );
        }

        let delay = backoff.next_delay();
        warn!(
            unprocessed = remainder.len(),
            attempt = submissions,
            delay_ms = delay.as_millis() as u64,
            "Store left records unprocessed, resubmitting remainder"
        );
        pending = remainder;
        if before(deadline, tokio::time::sleep(delay)).await.is_none() {
            return expired(&pending, total, submissions);
        }
    }
}

async fn before<F: Future>(deadline: Option<Instant>, future: F) -> Option<F::Output> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, future).await.ok(),
        None => Some(future.await),
    }
}

fn expired(
    pending: &[CustomerRecord],
    total: usize,
    submissions: u32,
) -> TaskResult<PersistReport> {
    let message = format!(
        "{} of {} records still pending at run deadline after {} submissions",
        pending.len(),
        total,
        submissions
    );
    TaskResult::failure(OnboardingError::DeadlineExceeded(message), pending.labels())
}
