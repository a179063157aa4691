//! Per-run counts and failure records

use crate::core::batch::{Aggregate, Stage, StageSummary, TaskFailure};
use tracing::info;

/// A failure and the stage it happened in
#[derive(Debug)]
pub struct StageFailure {
    pub stage: Stage,
    pub failure: TaskFailure,
}

/// What one pipeline run did. Nothing here outlives the run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub received: usize,
    pub decode: StageSummary,
    pub create: StageSummary,
    pub persist: StageSummary,
    pub replicate: StageSummary,
    pub acknowledge: StageSummary,
    pub failures: Vec<StageFailure>,
}

impl RunSummary {
    pub fn new(received: usize) -> Self {
        Self {
            received,
            ..Default::default()
        }
    }

    /// Store the counts of a finished stage and return its successes
    pub(crate) fn record<T>(&mut self, stage: Stage, attempted: usize, aggregate: Aggregate<T>) -> Vec<T> {
        *self.stage_mut(stage) = StageSummary::from_counts(attempted, aggregate.failed_items());
        self.failures.extend(
            aggregate
                .failures
                .into_iter()
                .map(|failure| StageFailure { stage, failure }),
        );
        aggregate.succeeded
    }

    fn stage_mut(&mut self, stage: Stage) -> &mut StageSummary {
        match stage {
            Stage::Decode => &mut self.decode,
            Stage::Create => &mut self.create,
            Stage::Persist => &mut self.persist,
            Stage::Replicate => &mut self.replicate,
            Stage::Acknowledge => &mut self.acknowledge,
        }
    }

    pub fn failures_in(&self, stage: Stage) -> impl Iterator<Item = &TaskFailure> {
        self.failures
            .iter()
            .filter(move |f| f.stage == stage)
            .map(|f| &f.failure)
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn log(&self) {
        info!(
            received = self.received,
            created = self.create.succeeded,
            create_failed = self.create.failed,
            persisted = self.persist.succeeded,
            persist_failed = self.persist.failed,
            replicated = self.replicate.succeeded,
            replicate_failed = self.replicate.failed,
            acknowledged = self.acknowledge.succeeded,
            acknowledge_failed = self.acknowledge.failed,
            "Onboarding run complete"
        );
    }
}
