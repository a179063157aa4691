//! Network utilities
//!
//! This module provides HTTP client construction for the provider adapters.

pub mod http;

pub use http::*;
