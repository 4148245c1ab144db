//! Error types for the ICP dashboard service.

use std::time::Duration;

use uuid::Uuid;

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Failures surfaced by the external ingestion and OAuth collaborators.
///
/// A failed submission never moves the wizard to its terminal step.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Network failure talking to {collaborator}: {reason}")]
    NetworkFailure { collaborator: String, reason: String },

    #[error("Validation failed: {reason}")]
    ValidationFailure { reason: String },

    #[error("{collaborator} timed out after {timeout:?}")]
    Timeout {
        collaborator: String,
        timeout: Duration,
    },
}

impl SubmissionError {
    pub fn network(collaborator: &str, reason: impl Into<String>) -> Self {
        Self::NetworkFailure {
            collaborator: collaborator.to_string(),
            reason: reason.into(),
        }
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        Self::ValidationFailure {
            reason: reason.into(),
        }
    }
}

/// Wizard session registry errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Wizard session {id} not found")]
    NotFound { id: Uuid },
}

/// Pricing errors.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Unknown plan: {plan_id}")]
    UnknownPlan { plan_id: String },
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
