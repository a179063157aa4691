//! Stripe billing adapter
//!
//! Creates customers through `POST /v1/customers` with a form-encoded body.

use crate::config::StripeConfig;
use crate::core::traits::BillingApi;
use crate::utils::error::{OnboardingError, Result};
use crate::utils::net::create_http_client;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const CUSTOMERS_PATH: &str = "/v1/customers";

/// Stripe API client
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    api_key: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct CustomerResponse {
    #[serde(default)]
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl StripeClient {
    pub fn new(config: &StripeConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| OnboardingError::config("Stripe API key is not set"))?;
        let client = create_http_client(Duration::from_secs(config.timeout_secs))?;

        Ok(Self::with_client(client, api_key, &config.api_base))
    }

    pub fn with_client(client: Client, api_key: impl Into<String>, api_base: &str) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn customers_url(&self) -> String {
        format!("{}{}", self.api_base, CUSTOMERS_PATH)
    }
}

#[async_trait]
impl BillingApi for StripeClient {
    async fn create_account(&self, email: &str, full_name: &str) -> Result<String> {
        let params = [("email", email), ("name", full_name), ("tax_exempt", "none")];

        let response = self
            .client
            .post(self.customers_url())
            .bearer_auth(&self.api_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| OnboardingError::network(format!("Stripe request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(map_error_response(status, &body));
        }

        let customer: CustomerResponse = serde_json::from_str(&body).map_err(|e| {
            OnboardingError::billing(format!("Unexpected Stripe response: {}", e))
        })?;
        if customer.id.is_empty() {
            return Err(OnboardingError::billing("Stripe returned a customer without an id"));
        }

        debug!(stripe_customer_id = %customer.id, "Stripe customer created");
        Ok(customer.id)
    }
}

/// Map a non-2xx response to an error
fn map_error_response(status: StatusCode, body: &str) -> OnboardingError {
    let detail = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let error = envelope.error;
            let mut detail = error.message.unwrap_or_else(|| "unknown error".to_string());
            if let Some(kind) = error.kind {
                detail.push_str(&format!(" (type: {}", kind));
                if let Some(code) = error.code {
                    detail.push_str(&format!(", code: {}", code));
                }
                detail.push(')');
            }
            detail
        }
        Err(_) => body.to_string(),
    };

    let message = format!("Stripe returned {}: {}", status.as_u16(), detail);
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        OnboardingError::network(message)
    } else {
        OnboardingError::billing(message)
    }
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}
