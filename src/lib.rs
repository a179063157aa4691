//! # customer-onboarding
//!
//! Queue-driven customer onboarding. A batch of queued customer-creation
//! requests is turned into billing accounts, persisted as customer records,
//! replicated into the identity directory and finally acknowledged on the
//! source queue.
//!
//! ## Features
//!
//! - **Fan-out/fan-in stages**: every stage runs one task per item or chunk
//!   and waits for all of them before the next stage starts
//! - **Partial failures**: a failing item is logged and dropped without
//!   affecting its siblings
//! - **Provider batch limits**: writes go out in chunks of 25, deletes in
//!   chunks of 10
//! - **Unprocessed remainders**: bulk writes resubmit only what the store
//!   handed back, with bounded attempts and backoff
//!
//! ## Usage
//!
//! ```rust,ignore
//! use customer_onboarding::{Clients, Config, OnboardingPipeline, QueueEvent};
//!
//! let config = Config::from_env()?;
//! config.validate()?;
//!
//! let pipeline = OnboardingPipeline::new(clients, config.pipeline.clone());
//! let event = QueueEvent::from_json(&payload)?;
//! let summary = pipeline.run(event.records).await?;
//! assert!(summary.is_clean());
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::batch::{Stage, StageSummary, TaskFailure, TaskResult};
pub use core::models::{InboundMessage, OnboardingItem, QueueEvent};
pub use core::pipeline::{Clients, OnboardingPipeline, RunSummary};
pub use utils::error::{OnboardingError, Result};
