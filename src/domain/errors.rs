//! Domain errors for the drover push pipeline.

use thiserror::Error;

/// Domain-level errors that can occur while pushing a plan.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An issue failed pre-push validation. Raised before any remote write
    /// and never retried. The message carries the serialized issue.
    #[error("Invalid issue: {0}")]
    InvalidIssue(String),

    /// A remote write (issue, board item, label, team, milestone) failed.
    #[error("Remote write failed: {0}")]
    RemoteWrite(String),

    /// The remote index could not be refreshed. Callers treat this as
    /// "nothing to dedupe yet" and proceed.
    #[error("Remote sync failed: {0}")]
    Sync(String),

    /// The processed store could not be read or appended.
    #[error("Store error: {0}")]
    Store(String),

    /// JSON (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation of an input value other than an issue failed.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

/// Result alias used throughout the domain and service layers.
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Store(err.to_string())
    }
}
