//! DynamoDB record store

use crate::core::models::CustomerRecord;
use crate::core::traits::RecordStore;
use crate::utils::error::{OnboardingError, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use std::collections::HashMap;
use tracing::debug;

/// Writes customer records with `BatchWriteItem`
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl RecordStore for DynamoDbStore {
    async fn bulk_persist(&self, records: &[CustomerRecord]) -> Result<Vec<CustomerRecord>> {
        let requests = records
            .iter()
            .map(write_request)
            .collect::<Result<Vec<_>>>()?;

        let output = self
            .client
            .batch_write_item()
            .request_items(&self.table_name, requests)
            .send()
            .await
            .map_err(|e| {
                OnboardingError::store(format!("BatchWriteItem failed: {}", DisplayErrorContext(&e)))
            })?;

        let remainder = output
            .unprocessed_items()
            .and_then(|tables| tables.get(&self.table_name))
            .map(|requests| unprocessed_records(requests, records))
            .unwrap_or_default();

        debug!(
            table_name = %self.table_name,
            submitted = records.len(),
            unprocessed = remainder.len(),
            "BatchWriteItem completed"
        );
        Ok(remainder)
    }
}

/// Marshal one record into a put request
fn write_request(record: &CustomerRecord) -> Result<WriteRequest> {
    let put = PutRequest::builder()
        .set_item(Some(to_item(record)))
        .build()
        .map_err(|e| OnboardingError::store(format!("Invalid put request: {}", e)))?;

    Ok(WriteRequest::builder().put_request(put).build())
}

fn to_item(record: &CustomerRecord) -> HashMap<String, AttributeValue> {
    record
        .attributes()
        .into_iter()
        .map(|(name, value)| (name.to_string(), AttributeValue::S(value.to_string())))
        .collect()
}

/// Unmarshal the put requests the table handed back, matching each to the
/// submitted record with the same key so the message id survives
fn unprocessed_records(requests: &[WriteRequest], submitted: &[CustomerRecord]) -> Vec<CustomerRecord> {
    requests
        .iter()
        .filter_map(WriteRequest::put_request)
        .map(|put| {
            let item = put.item();
            let rebuilt = CustomerRecord::from_attributes(|name| {
                item.get(name).and_then(|value| value.as_s().ok()).map(String::as_str)
            });
            submitted
                .iter()
                .find(|record| record.pk == rebuilt.pk && record.sk == rebuilt.sk)
                .cloned()
                .unwrap_or(rebuilt)
        })
        .collect()
}
