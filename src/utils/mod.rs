//! Utility modules
//!
//! - **error**: error type and retry backoff
//! - **logging**: tracing subscriber setup
//! - **net**: HTTP client construction

pub mod error;
pub mod logging;
pub mod net;

pub use error::{OnboardingError, Result};
