//! Test fixtures and data factories

use customer_onboarding::config::{PersistRetryConfig, PipelineSettings};
use customer_onboarding::core::models::InboundMessage;
use serde_json::json;

/// Factory for queue messages
pub struct MessageFactory;

impl MessageFactory {
    /// Message `n` for user `user-<n>` with email `user<n>@example.com`
    pub fn customer(n: usize) -> InboundMessage {
        let body = json!({
            "cognitoUserID": format!("user-{}", n),
            "firstName": format!("First{}", n),
            "surName": format!("Last{}", n),
            "email": Self::email(n),
        });

        InboundMessage {
            message_id: Self::message_id(n),
            receipt_handle: format!("rh-{}", n),
            body: body.to_string(),
        }
    }

    /// Messages `1..=count`
    pub fn batch(count: usize) -> Vec<InboundMessage> {
        (1..=count).map(Self::customer).collect()
    }

    /// Message whose body is not a customer request
    pub fn malformed(n: usize) -> InboundMessage {
        InboundMessage {
            message_id: Self::message_id(n),
            receipt_handle: format!("rh-{}", n),
            body: "{\"cognitoUserID\": 42".to_string(),
        }
    }

    pub fn message_id(n: usize) -> String {
        format!("msg-{}", n)
    }

    pub fn email(n: usize) -> String {
        format!("user{}@example.com", n)
    }

    /// Queue event document carrying `messages`
    pub fn event_json(messages: &[InboundMessage]) -> String {
        let records: Vec<_> = messages
            .iter()
            .map(|m| {
                json!({
                    "messageId": m.message_id,
                    "receiptHandle": m.receipt_handle,
                    "body": m.body,
                    "eventSource": "aws:sqs",
                })
            })
            .collect();
        json!({ "Records": records }).to_string()
    }
}

/// Pipeline settings with millisecond backoff so remainder tests stay fast
pub fn fast_settings() -> PipelineSettings {
    PipelineSettings {
        persist_retry: PersistRetryConfig {
            max_attempts: 4,
            base_delay_ms: 1,
            max_delay_ms: 5,
            ..Default::default()
        },
        ..Default::default()
    }
}
