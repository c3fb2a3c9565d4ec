//! Error types for the verification client

use thiserror::Error;

/// Result type alias for verification operations
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Errors that can occur when talking to the verification service
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The remote service answered with a non-success status
    #[error("Verification service rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Error message from the service, or a generic fallback
        message: String,
    },

    /// The remote service could not be reached
    #[error("Verification service unavailable: {service}")]
    ServiceUnavailable {
        /// Service name
        service: String,
    },

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<VerifyError> for swyft_core::Error {
    fn from(err: VerifyError) -> Self {
        Self::Verification(err.to_string())
    }
}
