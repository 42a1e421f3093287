//! Error types for the check gateway

use checkwarden_api::CheckId;
use thiserror::Error;

/// Errors that can occur when talking to the monitoring service
#[derive(Error, Debug)]
pub enum GatewayError {
    /// HTTP request failed (connection, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with an error status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the service
        message: String,
    },

    /// No check exists with this id
    #[error("check not found (id: {0})")]
    NotFound(CheckId),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Response did not have the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Gateway cannot be constructed from the given settings
    #[error("invalid gateway configuration: {0}")]
    Config(String),
}

impl GatewayError {
    /// Check if the error means the check does not exist
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound(_))
    }
}

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;
