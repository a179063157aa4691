//! Batch orchestration primitives
//!
//! Provider-sized chunking, concurrent fan-out with a completion barrier, and
//! the partial-failure fan-in used by every pipeline stage.

mod aggregate;
mod chunker;
mod executor;
mod types;


pub use aggregate::{Aggregate, Stage, StageSummary, aggregate};
pub use chunker::{BULK_DELETE_LIMIT, BULK_WRITE_LIMIT, chunk};
pub use executor::{FanOutConfig, FanOutExecutor};
pub use types::{Labeled, Labels, TaskFailure, TaskResult};
