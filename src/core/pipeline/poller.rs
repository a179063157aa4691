//! Pull-based driver: receive a batch, run it, repeat

use super::OnboardingPipeline;
use crate::core::traits::MessageSource;
use crate::utils::error::Result;
use std::time::Duration;
use tracing::{debug, error, info};

/// Largest batch the queue hands out per receive
pub const MAX_RECEIVE_BATCH: usize = 10;

#[derive(Debug, Clone)]
pub struct PollOptions {
    pub max_messages: usize,
    /// Long-poll wait per receive
    pub wait: Duration,
    /// Stop after this many receives; `None` polls until cancelled
    pub max_polls: Option<usize>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            max_messages: MAX_RECEIVE_BATCH,
            wait: Duration::from_secs(20),
            max_polls: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub polls: usize,
    pub batches: usize,
    pub messages: usize,
    pub aborted_runs: usize,
}

/// Receive and process batches until `max_polls` is reached.
///
/// An aborted run leaves its messages on the queue for redelivery and does
/// not stop polling; a failing receive does.
pub async fn poll(
    pipeline: &OnboardingPipeline,
    source: &dyn MessageSource,
    options: &PollOptions,
) -> Result<PollStats> {
    let mut stats = PollStats::default();
    let max_messages = options.max_messages.clamp(1, MAX_RECEIVE_BATCH);

    while options.max_polls.is_none_or(|max| stats.polls < max) {
        let messages = source.receive(max_messages, options.wait).await?;
        stats.polls += 1;

        if messages.is_empty() {
            debug!("No messages received");
            continue;
        }

        stats.batches += 1;
        stats.messages += messages.len();

        if let Err(e) = pipeline.run(messages).await {
            stats.aborted_runs += 1;
            error!(error = %e, "Onboarding run aborted, messages left for redelivery");
        }
    }

    info!(
        polls = stats.polls,
        batches = stats.batches,
        messages = stats.messages,
        "Polling finished"
    );
    Ok(stats)
}
