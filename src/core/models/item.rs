//! Inbound messages and the onboarding work item

use super::queue::AckEntry;
use crate::core::batch::{Labeled, Labels};
use crate::utils::error::{OnboardingError, Result};
use serde::{Deserialize, Serialize};

/// Queue event document as delivered by the event source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<InboundMessage>,
}

impl QueueEvent {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| OnboardingError::malformed(format!("Invalid queue event: {}", e)))
    }
}

/// One queue message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "messageId")]
    pub message_id: String,
    #[serde(rename = "receiptHandle")]
    pub receipt_handle: String,
    #[serde(default)]
    pub body: String,
}

impl Labeled for InboundMessage {
    fn labels(&self) -> Labels {
        Labels::messages(vec![self.message_id.clone()])
    }
}

/// Message body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRequest {
    #[serde(rename = "cognitoUserID")]
    pub cognito_user_id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "surName")]
    pub sur_name: String,
    pub email: String,
}

/// A customer moving through the pipeline.
///
/// `stripe_customer_id` stays empty until the create stage succeeds; only
/// enriched items are handed to later stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingItem {
    pub message_id: String,
    pub receipt_handle: String,
    pub cognito_user_id: String,
    pub stripe_customer_id: String,
    pub first_name: String,
    pub sur_name: String,
    pub email: String,
}

impl OnboardingItem {
    /// Decode the JSON body of a queue message
    pub fn decode(message: &InboundMessage) -> Result<Self> {
        let request: CustomerRequest = serde_json::from_str(&message.body).map_err(|e| {
            OnboardingError::malformed(format!(
                "Unable to unmarshal event ID {}: {}",
                message.message_id, e
            ))
        })?;

        Ok(Self {
            message_id: message.message_id.clone(),
            receipt_handle: message.receipt_handle.clone(),
            cognito_user_id: request.cognito_user_id,
            stripe_customer_id: String::new(),
            first_name: request.first_name,
            sur_name: request.sur_name,
            email: request.email,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.sur_name)
    }

    pub fn has_account(&self) -> bool {
        !self.stripe_customer_id.is_empty()
    }

    pub fn ack_entry(&self) -> AckEntry {
        AckEntry {
            id: self.message_id.clone(),
            receipt_handle: self.receipt_handle.clone(),
            cognito_user_id: self.cognito_user_id.clone(),
        }
    }
}

impl Labeled for OnboardingItem {
    fn labels(&self) -> Labels {
        Labels::item(self.message_id.clone(), self.cognito_user_id.clone())
    }
}
