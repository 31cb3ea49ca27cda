//! Error types for correction requests

use thiserror::Error;

/// Failure of a correction request
///
/// Both variants surface to the caller as a JSON-RPC `-32000` error whose
/// message is this error's display text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CorrectionError {
    /// The request carried no usable text
    #[error("{0}")]
    InvalidInput(String),

    /// The model call or result assembly failed
    #[error("{0}")]
    Internal(String),
}

impl CorrectionError {
    pub fn no_message() -> Self {
        CorrectionError::InvalidInput("No message provided".to_string())
    }

    pub fn no_text() -> Self {
        CorrectionError::InvalidInput("No text provided".to_string())
    }

    /// Wrap an underlying failure the way it is reported to clients
    pub fn internal(err: impl std::fmt::Display) -> Self {
        CorrectionError::Internal(format!("internal server error: {}", err))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CorrectionError::InvalidInput(_))
    }
}

/// Result type alias for correction operations
pub type CorrectionResult<T> = Result<T, CorrectionError>;

/// Failure talking to the correction model
#[derive(Debug, Error)]
pub enum ModelError {
    /// Network-level failure reaching the provider
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider answered with an error
    #[error("{provider} error: {message}")]
    Provider { provider: String, message: String },

    /// The provider's answer did not match the declared output schema
    #[error("Malformed model output: {0}")]
    Parse(#[from] serde_json::Error),

    /// The call did not finish within the configured bound
    #[error("model call timed out after {0}s")]
    Timeout(u64),
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ModelError::Transport(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            ModelError::Transport(format!("Connection error: {}", err))
        } else {
            ModelError::Transport(err.to_string())
        }
    }
}

impl From<ModelError> for CorrectionError {
    fn from(err: ModelError) -> Self {
        CorrectionError::internal(err)
    }
}
