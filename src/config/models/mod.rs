//! Configuration data models
//!
//! This module defines all configuration structures used by the pipeline and
//! its adapters.

#![allow(missing_docs)]

pub mod aws;
pub mod pipeline;
pub mod stripe;

// Re-export all configuration types
pub use aws::*;
pub use pipeline::*;
pub use stripe::*;

/// Default Stripe API base URL
pub fn default_stripe_api_base() -> String {
    "https://api.stripe.com".to_string()
}

/// Default HTTP timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default directory attribute holding the billing account id
pub fn default_account_attribute() -> String {
    "custom:stripe_customer_id".to_string()
}

/// Default table sort key
pub fn default_sort_key() -> String {
    crate::core::models::DEFAULT_SORT_KEY.to_string()
}
