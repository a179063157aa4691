//! Stage workers and their fan-outs

use super::remainder::{PersistReport, persist_chunk};
use crate::core::batch::{
    Aggregate, BULK_DELETE_LIMIT, BULK_WRITE_LIMIT, FanOutExecutor, Labeled, Stage,
    TaskResult, aggregate, chunk,
};
use crate::core::models::{AckEntry, CustomerRecord, OnboardingItem};
use crate::core::traits::{BillingApi, DirectoryApi, QueueApi, RecordStore};
use crate::utils::error::{OnboardingError, RetryConfig};
use std::sync::Arc;
use tracing::{debug, info};

/// Create one billing account and enrich the item with its id
pub(crate) async fn create_account(
    billing: &dyn BillingApi,
    mut item: OnboardingItem,
) -> TaskResult<OnboardingItem> {
    let labels = item.labels();

    match billing.create_account(&item.email, &item.full_name()).await {
        Ok(account_id) if account_id.is_empty() => TaskResult::failure(
            OnboardingError::billing("provider returned an empty customer id"),
            labels,
        ),
        Ok(account_id) => {
            info!(
                cognito_user_id = %item.cognito_user_id,
                stripe_customer_id = %account_id,
                "Created stripe customer ID"
            );
            item.stripe_customer_id = account_id;
            TaskResult::Success(item)
        }
        Err(error) => TaskResult::failure(error, labels),
    }
}

pub(crate) async fn create_accounts(
    executor: &FanOutExecutor,
    billing: Arc<dyn BillingApi>,
    items: Vec<OnboardingItem>,
) -> Aggregate<OnboardingItem> {
    let results = executor
        .execute(items, move |item| {
            let billing = billing.clone();
            async move { create_account(billing.as_ref(), item).await }
        })
        .await;

    aggregate(Stage::Create, results)
}

pub(crate) async fn persist_records(
    executor: &FanOutExecutor,
    store: Arc<dyn RecordStore>,
    retry: RetryConfig,
    records: Vec<CustomerRecord>,
) -> Aggregate<PersistReport> {
    let chunks = chunk(records, BULK_WRITE_LIMIT);
    debug!(chunks = chunks.len(), "Persisting customer records");

    // Each chunk watches the deadline itself so an expiry blames only its
    // outstanding remainder.
    let deadline = executor.deadline();
    let results = executor
        .without_deadline()
        .execute(chunks, move |chunk| {
            let store = store.clone();
            let retry = retry.clone();
            async move { persist_chunk(store.as_ref(), chunk, &retry, deadline).await }
        })
        .await;

    aggregate(Stage::Persist, results)
}

async fn replicate_account_id(directory: &dyn DirectoryApi, item: OnboardingItem) -> TaskResult<()> {
    let result = directory
        .update_attribute(&item.cognito_user_id, &item.stripe_customer_id)
        .await;
    TaskResult::from_result(result, item.labels())
}

pub(crate) async fn replicate_account_ids(
    executor: &FanOutExecutor,
    directory: Arc<dyn DirectoryApi>,
    items: Vec<OnboardingItem>,
) -> Aggregate<()> {
    let results = executor
        .execute(items, move |item| {
            let directory = directory.clone();
            async move { replicate_account_id(directory.as_ref(), item).await }
        })
        .await;

    aggregate(Stage::Replicate, results)
}

/// Delete one window of messages; refused entries fail, the rest succeed
pub(crate) async fn acknowledge_chunk(queue: &dyn QueueApi, entries: Vec<AckEntry>) -> TaskResult<usize> {
    let failed = match queue.bulk_acknowledge(&entries).await {
        Ok(failed) => failed,
        Err(error) => return TaskResult::failure(error, entries.labels()),
    };

    if failed.is_empty() {
        return TaskResult::Success(entries.len());
    }

    let detail = serde_json::to_string(&failed)
        .unwrap_or_else(|_| format!("{} failed entries", failed.len()));
    let refused: Vec<AckEntry> = entries
        .iter()
        .filter(|entry| failed.iter().any(|f| f.id == entry.id))
        .cloned()
        .collect();

    TaskResult::failure(
        OnboardingError::partial_batch(format!(
            "{} of {} messages not deleted: {}",
            failed.len(),
            entries.len(),
            detail
        )),
        refused.labels(),
    )
}

pub(crate) async fn acknowledge_messages(
    executor: &FanOutExecutor,
    queue: Arc<dyn QueueApi>,
    entries: Vec<AckEntry>,
) -> Aggregate<usize> {
    let chunks = chunk(entries, BULK_DELETE_LIMIT);
    debug!(chunks = chunks.len(), "Acknowledging source messages");

    let results = executor
        .execute(chunks, move |chunk| {
            let queue = queue.clone();
            async move { acknowledge_chunk(queue.as_ref(), chunk).await }
        })
        .await;

    aggregate(Stage::Acknowledge, results)
}
