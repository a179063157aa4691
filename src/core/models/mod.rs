//! Core data models for the onboarding pipeline
//!
//! This module defines the inbound message shapes, the work item carried
//! through the stages, and the provider-facing records derived from it.

pub mod item;
pub mod queue;
pub mod record;

// Re-export commonly used types
pub use item::{CustomerRequest, InboundMessage, OnboardingItem, QueueEvent};
pub use queue::{AckEntry, FailedEntry};
pub use record::{CustomerRecord, DEFAULT_SORT_KEY, USER_KEY_PREFIX};
