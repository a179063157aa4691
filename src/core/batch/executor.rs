//! Fan-out executor
//!
//! Launches one task per input, collects exactly one [`TaskResult`] per task
//! through a channel sized to the task count, and returns once every task has
//! finished.

use super::types::{Labeled, TaskResult};
use crate::utils::error::OnboardingError;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::time::Instant;
use tracing::{debug, error};

/// Configuration for a fan-out
#[derive(Debug, Clone, Default)]
pub struct FanOutConfig {
    /// Maximum tasks running at once across every fan-out of one executor;
    /// `None` runs every task immediately
    pub max_in_flight: Option<usize>,
    /// Instant after which still-running tasks are reported as failed
    pub deadline: Option<Instant>,
}

impl FanOutConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set concurrency limit
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = Some(max_in_flight.max(1));
        self
    }

    /// Set the run deadline
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }
}

/// Fan-out executor for concurrent per-item or per-chunk work.
///
/// Clones share one in-flight limiter, so fan-outs running side by side on
/// the same executor stay within `max_in_flight` together.
#[derive(Debug, Clone, Default)]
pub struct FanOutExecutor {
    config: FanOutConfig,
    limiter: Option<Arc<Semaphore>>,
}

impl FanOutExecutor {
    /// Create a new executor
    pub fn new(config: FanOutConfig) -> Self {
        let limiter = config
            .max_in_flight
            .map(|permits| Arc::new(Semaphore::new(permits)));
        Self { config, limiter }
    }

    /// Deadline applied to every task of this executor
    pub fn deadline(&self) -> Option<Instant> {
        self.config.deadline
    }

    /// Same limiter, no deadline; for workers that enforce the deadline
    /// themselves and label an expiry more precisely than the executor can
    pub fn without_deadline(&self) -> Self {
        Self {
            config: self.config.clone().with_deadline(None),
            limiter: self.limiter.clone(),
        }
    }

    /// Run `worker` once per task and wait for all of them.
    ///
    /// The returned results are in completion order, not input order; callers
    /// key them by the labels inside each failure or by the success payload.
    /// A task that panics or outlives the deadline still produces a failure
    /// labelled with its input's identity.
    ///
    /// # Example
    /// ```rust,ignore
    /// let results = FanOutExecutor::default()
    ///     .execute(items, |item| async move {
    ///         let labels = item.labels();
    ///         TaskResult::from_result(create(&item).await, labels)
    ///     })
    ///     .await;
    /// ```
    pub async fn execute<T, R, F, Fut>(&self, tasks: Vec<T>, worker: F) -> Vec<TaskResult<R>>
    where
        T: Labeled + Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = TaskResult<R>> + Send + 'static,
    {
        let count = tasks.len();
        if count == 0 {
            return Vec::new();
        }

        // Capacity equals the task count, so no send ever waits on the reader.
        let (tx, mut rx) = mpsc::channel::<TaskResult<R>>(count);
        let deadline = self.config.deadline;

        let mut handles = Vec::with_capacity(count);
        for task in tasks {
            let labels = task.labels();
            let tx = tx.clone();
            let worker = worker.clone();
            let limiter = self.limiter.clone();
            let task_labels = labels.clone();

            let handle = tokio::spawn(async move {
                // Waiting for a permit counts against the deadline too
                let run = async move {
                    let _permit = match limiter {
                        Some(semaphore) => semaphore.acquire_owned().await.ok(),
                        None => None,
                    };
                    worker(task).await
                };

                let result = match deadline {
                    Some(deadline) => tokio::time::timeout_at(deadline, run)
                        .await
                        .unwrap_or_else(|_| {
                            TaskResult::failure(
                                OnboardingError::DeadlineExceeded(
                                    "worker still running at run deadline".to_string(),
                                ),
                                task_labels,
                            )
                        }),
                    None => run.await,
                };

                if tx.send(result).await.is_err() {
                    error!("Fan-out result channel closed before task completed");
                }
            });
            handles.push((handle, labels));
        }
        drop(tx);

        // Barrier: every task has either sent its result or panicked.
        let mut results = Vec::with_capacity(count);
        for (handle, labels) in handles {
            if let Err(join_error) = handle.await {
                error!(
                    message_ids = ?labels.message_ids,
                    cognito_user_ids = ?labels.user_ids,
                    "Fan-out task did not complete: {}",
                    join_error
                );
                results.push(TaskResult::failure(
                    OnboardingError::TaskPanicked(join_error.to_string()),
                    labels,
                ));
            }
        }

        while let Ok(result) = rx.try_recv() {
            results.push(result);
        }

        debug!(tasks = count, results = results.len(), "Fan-out complete");
        debug_assert_eq!(results.len(), count);
        results
    }
}
