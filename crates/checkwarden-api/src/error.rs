//! Error types for parsing check values

use thiserror::Error;

/// Errors raised when a check value cannot be parsed from user input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Check id is not a positive integer
    #[error("invalid check id: {0:?}")]
    CheckId(String),

    /// Alert policy id is not a positive integer
    #[error("invalid alert policy id: {0:?}")]
    AlertPolicyId(String),

    /// Resolution outside the allowed set
    #[error("invalid resolution {0:?} (expected one of 1, 5, 15, 30, 60)")]
    Resolution(String),

    /// Unsupported check type
    #[error("unsupported check type {0:?} (expected http)")]
    CheckType(String),
}
