//! Helper functions for creating specific error types

use super::types::OnboardingError;

/// Helper functions for creating specific errors
impl OnboardingError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedInput(message.into())
    }

    pub fn billing<S: Into<String>>(message: S) -> Self {
        Self::Billing(message.into())
    }

    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store(message.into())
    }

    pub fn directory<S: Into<String>>(message: S) -> Self {
        Self::Directory(message.into())
    }

    pub fn queue<S: Into<String>>(message: S) -> Self {
        Self::Queue(message.into())
    }

    pub fn partial_batch<S: Into<String>>(message: S) -> Self {
        Self::PartialBatch(message.into())
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    /// Whether the failure is transient on the provider side.
    ///
    /// The pipeline never retries on its own; this only feeds log fields so
    /// operators can tell redelivery-worthy failures from permanent ones.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_)
            | Self::DeadlineExceeded(_)
            | Self::UnprocessedRemainder(_)
            | Self::PartialBatch(_) => true,
            Self::HttpClient(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Short machine-friendly name of the variant, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::MalformedInput(_) => "malformed_input",
            Self::Billing(_) => "billing",
            Self::Store(_) => "store",
            Self::Directory(_) => "directory",
            Self::Queue(_) => "queue",
            Self::PartialBatch(_) => "partial_batch",
            Self::UnprocessedRemainder(_) => "unprocessed_remainder",
            Self::DeadlineExceeded(_) => "deadline_exceeded",
            Self::TaskPanicked(_) => "task_panicked",
            Self::Network(_) => "network",
            Self::HttpClient(_) => "http_client",
            Self::Serialization(_) => "serialization",
            Self::Yaml(_) => "yaml",
            Self::Io(_) => "io",
        }
    }
}
