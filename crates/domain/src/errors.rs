//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Slotwatch
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SlotwatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Slotwatch operations
pub type Result<T> = std::result::Result<T, SlotwatchError>;

/// Failure raised at the boundary of an upstream data source.
///
/// Adapters never propagate these to the analysis pipeline as hard errors.
/// They are carried inside [`FetchOutcome::Degraded`] so callers can tell an
/// empty upstream apart from a failed one.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceError {
    /// Network or HTTP failure reaching the upstream service
    #[error("transport error: {message}")]
    Transport { message: String },

    /// Credential or token rejection
    #[error("authentication error: {message}")]
    Auth { message: String },

    /// Pagination halted by the safety cap
    #[error("result truncated at {fetched} records (limit {limit})")]
    Truncated { limit: usize, fetched: usize },

    /// The adapter was built without the credentials it needs
    #[error("missing credentials: {what}")]
    MissingCredentials { what: String },
}

impl SourceError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport { message: message.into() }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth { message: message.into() }
    }

    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingCredentials { what: what.into() }
    }
}

impl From<SourceError> for SlotwatchError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Transport { message } => Self::Network(message),
            SourceError::Auth { message } => Self::Auth(message),
            SourceError::MissingCredentials { what } => {
                Self::Config(format!("missing credentials: {what}"))
            }
            truncated @ SourceError::Truncated { .. } => Self::Internal(truncated.to_string()),
        }
    }
}

/// Result of a soft-failing upstream fetch.
///
/// `Complete` means the upstream answered fully (possibly with zero
/// records). `Degraded` means something went wrong; `records` holds whatever
/// was gathered before the failure, which is empty for transport and auth
/// failures and the capped prefix for truncation.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Complete(Vec<T>),
    Degraded { records: Vec<T>, error: SourceError },
}

impl<T> FetchOutcome<T> {
    /// Degraded outcome with no records.
    pub fn failed(error: SourceError) -> Self {
        Self::Degraded { records: Vec::new(), error }
    }

    pub fn records(&self) -> &[T] {
        match self {
            Self::Complete(records) | Self::Degraded { records, .. } => records,
        }
    }

    /// Consume the outcome keeping only the records (the non-fatal default).
    pub fn into_records(self) -> Vec<T> {
        match self {
            Self::Complete(records) | Self::Degraded { records, .. } => records,
        }
    }

    pub fn error(&self) -> Option<&SourceError> {
        match self {
            Self::Complete(_) => None,
            Self::Degraded { error, .. } => Some(error),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

impl<T> Default for FetchOutcome<T> {
    fn default() -> Self {
        Self::Complete(Vec::new())
    }
}
