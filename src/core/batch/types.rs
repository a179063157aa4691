//! Batch processing types and data structures

use crate::utils::error::{OnboardingError, Result};
use serde::Serialize;

/// Identity of the item(s) a unit of work was operating on.
///
/// Carried by every failure so that fan-in can log and count without going
/// back to the original inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Labels {
    /// Source queue message ids
    pub message_ids: Vec<String>,
    /// Directory (Cognito) user ids
    pub user_ids: Vec<String>,
}

impl Labels {
    /// Labels for a single item
    pub fn item(message_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            message_ids: vec![message_id.into()],
            user_ids: vec![user_id.into()],
        }
    }

    pub fn messages(message_ids: Vec<String>) -> Self {
        Self {
            message_ids,
            user_ids: Vec::new(),
        }
    }

    pub fn users(user_ids: Vec<String>) -> Self {
        Self {
            message_ids: Vec::new(),
            user_ids,
        }
    }

    /// Number of items these labels stand for
    pub fn item_count(&self) -> usize {
        self.message_ids.len().max(self.user_ids.len())
    }

    pub fn extend(&mut self, other: Labels) {
        self.message_ids.extend(other.message_ids);
        self.user_ids.extend(other.user_ids);
    }
}

/// Anything a fan-out task can be launched for.
pub trait Labeled {
    fn labels(&self) -> Labels;
}

impl<T: Labeled> Labeled for Vec<T> {
    fn labels(&self) -> Labels {
        self.as_slice().labels()
    }
}

impl<T: Labeled> Labeled for [T] {
    fn labels(&self) -> Labels {
        let mut labels = Labels::default();
        for item in self {
            labels.extend(item.labels());
        }
        labels
    }
}

/// A failed unit of work
#[derive(Debug)]
pub struct TaskFailure {
    pub error: OnboardingError,
    pub labels: Labels,
}

/// Outcome of exactly one fan-out task
#[derive(Debug)]
pub enum TaskResult<T> {
    Success(T),
    Failure(TaskFailure),
}

impl<T> TaskResult<T> {
    pub fn failure(error: OnboardingError, labels: Labels) -> Self {
        Self::Failure(TaskFailure { error, labels })
    }

    /// Attach labels to a plain `Result`
    pub fn from_result(result: Result<T>, labels: Labels) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::failure(error, labels),
        }
    }
}
