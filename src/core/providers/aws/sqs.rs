//! SQS source queue

use crate::core::models::{AckEntry, FailedEntry, InboundMessage};
use crate::core::traits::{MessageSource, QueueApi};
use crate::utils::error::{OnboardingError, Result};
use async_trait::async_trait;
use aws_sdk_sqs::Client;
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::types::{BatchResultErrorEntry, DeleteMessageBatchRequestEntry, Message};
use std::time::Duration;
use tracing::{debug, warn};

/// Service ceiling for `WaitTimeSeconds`
const MAX_WAIT_SECS: u64 = 20;

#[derive(Debug, Clone)]
pub struct SqsQueue {
    client: Client,
    queue_url: String,
}

impl SqsQueue {
    pub fn new(client: Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }
}

#[async_trait]
impl QueueApi for SqsQueue {
    async fn bulk_acknowledge(&self, entries: &[AckEntry]) -> Result<Vec<FailedEntry>> {
        let request_entries = entries
            .iter()
            .map(|entry| {
                DeleteMessageBatchRequestEntry::builder()
                    .id(&entry.id)
                    .receipt_handle(&entry.receipt_handle)
                    .build()
                    .map_err(|e| OnboardingError::queue(format!("Invalid delete entry: {}", e)))
            })
            .collect::<Result<Vec<_>>>()?;

        let output = self
            .client
            .delete_message_batch()
            .queue_url(&self.queue_url)
            .set_entries(Some(request_entries))
            .send()
            .await
            .map_err(|e| {
                OnboardingError::queue(format!("DeleteMessageBatch failed: {}", DisplayErrorContext(&e)))
            })?;

        let failed: Vec<FailedEntry> = output.failed().iter().map(failed_entry).collect();
        debug!(
            submitted = entries.len(),
            failed = failed.len(),
            "DeleteMessageBatch completed"
        );
        Ok(failed)
    }
}

#[async_trait]
impl MessageSource for SqsQueue {
    async fn receive(&self, max_messages: usize, wait: Duration) -> Result<Vec<InboundMessage>> {
        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(max_messages.clamp(1, 10) as i32)
            .wait_time_seconds(wait.as_secs().min(MAX_WAIT_SECS) as i32)
            .send()
            .await
            .map_err(|e| {
                OnboardingError::queue(format!("ReceiveMessage failed: {}", DisplayErrorContext(&e)))
            })?;

        Ok(output.messages().iter().filter_map(inbound_message).collect())
    }
}

fn failed_entry(entry: &BatchResultErrorEntry) -> FailedEntry {
    FailedEntry {
        id: entry.id().to_string(),
        sender_fault: entry.sender_fault(),
        message: entry
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| entry.code().to_string()),
    }
}

fn inbound_message(message: &Message) -> Option<InboundMessage> {
    match (message.message_id(), message.receipt_handle()) {
        (Some(message_id), Some(receipt_handle)) => Some(InboundMessage {
            message_id: message_id.to_string(),
            receipt_handle: receipt_handle.to_string(),
            body: message.body().unwrap_or_default().to_string(),
        }),
        _ => {
            warn!("Received a message without id or receipt handle, skipping");
            None
        }
    }
}
