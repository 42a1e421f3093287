//! Core error types for checkwarden-core

use checkwarden_api::CheckId;
use checkwarden_client::GatewayError;
use thiserror::Error;

/// Request is malformed or insufficient; raised before any remote call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Neither check id nor check name supplied
    #[error("either checkid or checkname must be specified")]
    MissingLookupKey,

    /// Creating a check without a target host
    #[error("host must be specified when creating new checks")]
    MissingHost,

    /// Creating a check without a check type
    #[error("checktype must be specified when creating new checks")]
    MissingCheckType,
}

/// Errors that terminate a reconciliation
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// Invalid request
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Explicitly requested check id does not exist
    #[error("cannot find check (id: {0})")]
    CheckNotFound(CheckId),

    /// Monitoring service call failed
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl ReconcileError {
    /// Check if the failure is caused by the request rather than the service
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ReconcileError::Validation(_) | ReconcileError::CheckNotFound(_)
        )
    }
}
