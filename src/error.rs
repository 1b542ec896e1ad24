//! Error types shared across the agent, provider, and storage domains.

use crate::provider::ProviderId;
use thiserror::Error;

/// Errors returned by component operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    /// Persisted data exists but could not be decoded.
    #[error("Corrupt persisted data in slot '{slot}': {reason}")]
    CorruptData { slot: String, reason: String },

    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("You cannot delete the last agent. Create another one first or edit this one.")]
    LastAgent,

    #[error("Invalid agent: {0}")]
    InvalidAgent(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    /// A submission was rejected or failed; the text is already rendered for display.
    #[error("{0}")]
    SubmitFailed(String),
}

impl From<sled::Error> for ApiError {
    fn from(err: sled::Error) -> Self {
        ApiError::StorageError(err.to_string())
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Failure category at the dispatcher boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rejected before any network call.
    PreconditionFailed,
    /// The transport or provider reported an error.
    TransportError,
    /// The provider answered without any text.
    EmptyResponse,
}

/// Normalized generation failure.
///
/// Every transport maps its own error shape into this one type so that
/// classification only ever sees `kind`, an optional HTTP status, and text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GenerationError {
    pub kind: FailureKind,
    pub message: String,
    pub provider: Option<ProviderId>,
    pub status: Option<u16>,
}

impl GenerationError {
    pub fn precondition(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::PreconditionFailed,
            message: message.into(),
            provider: None,
            status: None,
        }
    }

    pub fn transport(provider: ProviderId, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::TransportError,
            message: message.into(),
            provider: Some(provider),
            status: None,
        }
    }

    pub fn empty_response(provider: ProviderId) -> Self {
        Self {
            kind: FailureKind::EmptyResponse,
            message: "No content generated or API returned an empty response.".to_string(),
            provider: Some(provider),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}
