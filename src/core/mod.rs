//! Core functionality
//!
//! The batch engine, the stage pipeline built on it, the data models that
//! flow through the stages, the capability traits the stages call and the
//! adapters implementing them.

pub mod batch;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod traits;
