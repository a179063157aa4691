//! Core traits module
//!
//! Capability interfaces the pipeline invokes. Each is implemented by a
//! provider adapter in `core::providers` and by in-memory fakes in tests.

pub mod billing;
pub mod directory;
pub mod queue;
pub mod store;

pub use billing::*;
pub use directory::*;
pub use queue::*;
pub use store::*;
