//! Partial-failure fan-in

use super::types::{TaskFailure, TaskResult};
use serde::Serialize;
use std::fmt;
use tracing::error;

/// Pipeline stage a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Decode,
    Create,
    Persist,
    Replicate,
    Acknowledge,
}

impl Stage {
    /// Operator-facing log message for a failure in this stage
    pub fn failure_message(&self) -> &'static str {
        match self {
            Stage::Decode => "Unable to unmarshal event",
            Stage::Create => "Unable to create billing customer",
            Stage::Persist => "Error writing customer records to the store",
            Stage::Replicate => "Unable to add user attribute",
            Stage::Acknowledge => "Messages failed to batch delete",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Decode => "decode",
            Stage::Create => "create",
            Stage::Persist => "persist",
            Stage::Replicate => "replicate",
            Stage::Acknowledge => "acknowledge",
        };
        f.write_str(name)
    }
}

/// Fan-in of one stage: every success kept, every failure recorded
#[derive(Debug)]
pub struct Aggregate<T> {
    pub succeeded: Vec<T>,
    pub failures: Vec<TaskFailure>,
}

impl<T> Aggregate<T> {
    /// Items covered by failures (a chunk failure counts each of its items)
    pub fn failed_items(&self) -> usize {
        self.failures.iter().map(|f| f.labels.item_count()).sum()
    }
}

/// Split `results` into successes and failures, logging each failure.
///
/// Every result is visited; a failure never hides results delivered after it.
pub fn aggregate<T>(stage: Stage, results: Vec<TaskResult<T>>) -> Aggregate<T> {
    let mut succeeded = Vec::with_capacity(results.len());
    let mut failures = Vec::new();

    for result in results {
        match result {
            TaskResult::Success(value) => succeeded.push(value),
            TaskResult::Failure(failure) => {
                error!(
                    stage = %stage,
                    message_ids = ?failure.labels.message_ids,
                    cognito_user_ids = ?failure.labels.user_ids,
                    error_kind = failure.error.kind(),
                    retryable = failure.error.is_retryable(),
                    error = %failure.error,
                    "{}",
                    stage.failure_message()
                );
                failures.push(failure);
            }
        }
    }

    Aggregate {
        succeeded,
        failures,
    }
}

/// Item counts of one stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl StageSummary {
    /// Summary for a stage that attempted `attempted` items and lost `failed` of them
    pub fn from_counts(attempted: usize, failed: usize) -> Self {
        let failed = failed.min(attempted);
        Self {
            attempted,
            succeeded: attempted - failed,
            failed,
        }
    }
}
