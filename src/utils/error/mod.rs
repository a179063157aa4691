//! Error handling utilities
//!
//! This module provides the crate error type and the backoff policy used by
//! the bulk-write remainder loop.

pub mod error;
pub mod recovery;

// Re-export commonly used types
pub use error::*;
pub use recovery::*;
