//! Provider adapters
//!
//! Concrete implementations of the capability traits in `core::traits`.
//! The Stripe client is always available; the AWS adapters are compiled
//! with the `aws` feature.

pub mod stripe;

#[cfg(feature = "aws")]
pub mod aws;

pub use stripe::StripeClient;

#[cfg(feature = "aws")]
pub use aws::{AwsProviders, CognitoDirectory, DynamoDbStore, SqsQueue, build_clients};
