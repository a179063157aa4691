//! Onboarding pipeline
//!
//! Runs one batch of queue messages through create → persist/replicate →
//! acknowledge. Each stage fans out over its inputs and fully fans in before
//! the next stage starts; failed items are logged and dropped, never fatal to
//! their siblings.

mod poller;
mod remainder;
mod stages;
mod summary;


pub use poller::{PollOptions, PollStats, poll};
pub use remainder::{PersistReport, persist_chunk};
pub use summary::{RunSummary, StageFailure};

use crate::config::{MalformedPolicy, PipelineSettings};
use crate::core::batch::{
    Aggregate, FanOutConfig, FanOutExecutor, Labeled, Stage, TaskResult, aggregate,
};
use crate::core::models::{CustomerRecord, InboundMessage, OnboardingItem};
use crate::core::traits::{BillingApi, DirectoryApi, QueueApi, RecordStore};
use crate::utils::error::{Result, RetryConfig};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{error, info};

/// External systems the pipeline talks to, built once by the process
#[derive(Clone)]
pub struct Clients {
    pub billing: Arc<dyn BillingApi>,
    pub store: Arc<dyn RecordStore>,
    pub directory: Arc<dyn DirectoryApi>,
    pub queue: Arc<dyn QueueApi>,
}

/// Batch orchestration engine
pub struct OnboardingPipeline {
    clients: Clients,
    settings: PipelineSettings,
    retry: RetryConfig,
}

impl OnboardingPipeline {
    pub fn new(clients: Clients, settings: PipelineSettings) -> Self {
        let retry = settings.persist_retry.to_retry_config();
        Self {
            clients,
            settings,
            retry,
        }
    }

    /// Process one batch.
    ///
    /// Only a malformed message under [`MalformedPolicy::Abort`] makes this
    /// return an error, and then before any external call is made. All other
    /// failures are logged and counted in the returned summary.
    pub async fn run(&self, messages: Vec<InboundMessage>) -> Result<RunSummary> {
        info!("Handling {} events", messages.len());

        let received = messages.len();
        let mut summary = RunSummary::new(received);
        let items = self.decode(messages)?;
        let items = summary.record(Stage::Decode, received, items);

        let deadline = self.settings.run_timeout().map(|budget| Instant::now() + budget);
        let executor = FanOutExecutor::new(self.fan_out_config(deadline));

        // Create
        let attempted = items.len();
        let created = stages::create_accounts(&executor, self.clients.billing.clone(), items).await;
        let created = summary.record(Stage::Create, attempted, created);
        debug_assert!(created.iter().all(OnboardingItem::has_account));

        // Persist and replicate, concurrently over the same survivors
        let records: Vec<CustomerRecord> = created
            .iter()
            .map(|item| CustomerRecord::from_item(item, &self.settings.record_sort_key))
            .collect();
        let (persisted, replicated) = tokio::join!(
            stages::persist_records(
                &executor,
                self.clients.store.clone(),
                self.retry.clone(),
                records
            ),
            stages::replicate_account_ids(
                &executor,
                self.clients.directory.clone(),
                created.clone()
            ),
        );
        summary.record(Stage::Persist, created.len(), persisted);
        summary.record(Stage::Replicate, created.len(), replicated);

        // Acknowledge every create survivor, whatever persist/replicate did
        let entries = created.iter().map(OnboardingItem::ack_entry).collect();
        let acknowledged =
            stages::acknowledge_messages(&executor, self.clients.queue.clone(), entries).await;
        summary.record(Stage::Acknowledge, created.len(), acknowledged);

        summary.log();
        Ok(summary)
    }

    fn decode(&self, messages: Vec<InboundMessage>) -> Result<Aggregate<OnboardingItem>> {
        let mut results = Vec::with_capacity(messages.len());

        for message in &messages {
            match OnboardingItem::decode(message) {
                Ok(item) => results.push(TaskResult::Success(item)),
                Err(error) if self.settings.malformed_policy == MalformedPolicy::Abort => {
                    error!(
                        message_id = %message.message_id,
                        error = %error,
                        "Malformed message, aborting batch"
                    );
                    return Err(error);
                }
                Err(error) => results.push(TaskResult::failure(error, message.labels())),
            }
        }

        Ok(aggregate(Stage::Decode, results))
    }

    fn fan_out_config(&self, deadline: Option<Instant>) -> FanOutConfig {
        let config = FanOutConfig::new().with_deadline(deadline);
        match self.settings.max_in_flight {
            Some(limit) => config.with_max_in_flight(limit),
            None => config,
        }
    }
}

impl std::fmt::Debug for OnboardingPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnboardingPipeline")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
