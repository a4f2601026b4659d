//! Relay error types

use thiserror::Error;

/// Errors that can occur while processing a chat exchange
#[derive(Error, Debug)]
pub enum RelayError {
    /// The request carried no message text
    #[error("Message is required")]
    EmptyMessage,

    /// The completion service failed or returned an unusable response
    #[error("Completion service error: {0}")]
    Completion(String),

    /// The spreadsheet append failed
    #[error("Exchange logging error: {0}")]
    Logging(String),

    /// Service-account authorization failed
    #[error("Authorization error: {0}")]
    Auth(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RelayError {
    /// Create a completion error from any displayable cause
    pub fn completion(msg: impl Into<String>) -> Self {
        RelayError::Completion(msg.into())
    }

    /// Create a logging error from any displayable cause
    pub fn logging(msg: impl Into<String>) -> Self {
        RelayError::Logging(msg.into())
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
