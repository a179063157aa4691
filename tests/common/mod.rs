//! Common test utilities
//!
//! - In-memory fakes standing in for the billing provider, record store,
//!   directory and queue
//! - Fixtures for queue messages and pipeline settings

pub mod fakes;
pub mod fixtures;

// Re-export commonly used items
pub use fakes::{FakeBilling, FakeDirectory, FakeQueue, FakeStore, FakeWorld};
pub use fixtures::{MessageFactory, fast_settings};
