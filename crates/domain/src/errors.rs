//! Error types used throughout the application

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Agenda
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum AgendaError {
    /// A read against the backend failed; the cache keeps its last
    /// known-good snapshot.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// A required field is missing or invalid. Raised before any network
    /// call is made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A write was rejected or never reached the backend. The cache is
    /// left untouched.
    #[error("Mutation error: {0}")]
    Mutation(MutationFailure),

    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("Backend error: {0}")]
    Backend(BackendRejection),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Agenda operations
pub type Result<T> = std::result::Result<T, AgendaError>;

/// Non-success answer from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendRejection {
    pub status: u16,
    /// The `message` field of the response body, when the backend sent one.
    pub message: Option<String>,
}

impl fmt::Display for BackendRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "status {}: {}", self.status, message),
            None => write!(f, "status {}", self.status),
        }
    }
}

/// Coarse classification of a failed write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "status", rename_all = "snake_case")]
pub enum MutationFailureKind {
    /// The request never produced a response (connection, timeout).
    Network,
    /// The backend answered with the given non-success status.
    Rejected(u16),
    /// The backend answered but the body could not be understood.
    InvalidResponse,
    Unknown,
}

impl fmt::Display for MutationFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => f.write_str("network failure"),
            Self::Rejected(status) => write!(f, "rejected with status {status}"),
            Self::InvalidResponse => f.write_str("invalid response"),
            Self::Unknown => f.write_str("unknown failure"),
        }
    }
}

/// Failure report for a write, carrying the backend's own message when
/// one was available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationFailure {
    pub kind: MutationFailureKind,
    pub message: Option<String>,
}

impl MutationFailure {
    /// Classify an error raised while submitting a write.
    pub fn from_error(error: &AgendaError) -> Self {
        match error {
            AgendaError::Backend(rejection) => Self {
                kind: MutationFailureKind::Rejected(rejection.status),
                message: rejection.message.clone(),
            },
            AgendaError::Network(message) => {
                Self { kind: MutationFailureKind::Network, message: Some(message.clone()) }
            }
            AgendaError::InvalidResponse(message) => {
                Self { kind: MutationFailureKind::InvalidResponse, message: Some(message.clone()) }
            }
            AgendaError::NotFound(message) => {
                Self { kind: MutationFailureKind::Rejected(404), message: Some(message.clone()) }
            }
            AgendaError::Mutation(failure) => failure.clone(),
            _ => Self { kind: MutationFailureKind::Unknown, message: None },
        }
    }
}

impl fmt::Display for MutationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.kind, message),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl AgendaError {
    /// Stable label for logging fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch",
            Self::Validation(_) => "validation",
            Self::Mutation(_) => "mutation",
            Self::Network(_) => "network",
            Self::Backend(_) => "backend",
            Self::InvalidResponse(_) => "invalid_response",
            Self::NotFound(_) => "not_found",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }

    /// Wrap a read failure as a fetch error, keeping the original cause in
    /// the message.
    pub fn into_fetch(self) -> Self {
        match self {
            Self::Fetch(_) => self,
            other => Self::Fetch(other.to_string()),
        }
    }

    /// Wrap a write failure as a mutation error.
    pub fn into_mutation(self) -> Self {
        match self {
            Self::Mutation(_) | Self::Validation(_) => self,
            other => Self::Mutation(MutationFailure::from_error(&other)),
        }
    }
}
