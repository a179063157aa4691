//! Error types for the onboarding pipeline

use thiserror::Error;

/// Result type alias for the onboarding pipeline
pub type Result<T> = std::result::Result<T, OnboardingError>;

/// Main error type for the onboarding pipeline
#[derive(Error, Debug)]
pub enum OnboardingError {
    /// Configuration errors (missing or invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// An inbound message body could not be decoded
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Billing account creation failed
    #[error("Billing provider error: {0}")]
    Billing(String),

    /// Key-value store write failed
    #[error("Record store error: {0}")]
    Store(String),

    /// Identity directory update failed
    #[error("Directory error: {0}")]
    Directory(String),

    /// Queue call failed
    #[error("Queue error: {0}")]
    Queue(String),

    /// A bulk call reported some of its entries as failed
    #[error("Partial batch failure: {0}")]
    PartialBatch(String),

    /// A bulk write kept reporting unprocessed entries until the attempt bound
    #[error("Unprocessed remainder: {0}")]
    UnprocessedRemainder(String),

    /// Worker did not finish before the run deadline
    #[error("Deadline exceeded: {0}")]
    DeadlineExceeded(String),

    /// Worker task panicked before reporting a result
    #[error("Task panicked: {0}")]
    TaskPanicked(String),

    /// Network errors
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
