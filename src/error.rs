//! Error types for the Skillwright generation pipeline.

use thiserror::Error;

/// Errors surfaced by the library API.
///
/// Selection overflow and malformed stream frames are intentionally absent: both are
/// silent outcomes (`ToggleOutcome::Ignored`, `StreamFrame::Ignored`) rather than errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    #[error("Job busy: {0}")]
    JobBusy(String),

    #[error("Item not selected: {0}")]
    ItemNotSelected(String),

    #[error("Item not found in catalog: {0}")]
    ItemNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Registration failed: {0}")]
    RegistrationFailed(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Step not allowed: {0}")]
    StepBlocked(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl ApiError {
    /// True for errors the caller caused synchronously (bad prompt, busy job, bad request).
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidPrompt(_)
                | ApiError::JobBusy(_)
                | ApiError::ItemNotSelected(_)
                | ApiError::ItemNotFound(_)
                | ApiError::InvalidRequest(_)
                | ApiError::StepBlocked(_)
        )
    }
}
