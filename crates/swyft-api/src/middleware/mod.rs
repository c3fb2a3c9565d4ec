//! Middleware for the Swyft admin API

pub mod auth;
pub mod cors;

use axum::http::StatusCode;
use serde::Serialize;

/// Error body returned by middleware rejections
#[derive(Debug, Clone, Serialize)]
pub struct MiddlewareError {
    /// Human-readable message
    pub error: String,
    /// Stable machine code
    pub code: String,
}

impl MiddlewareError {
    /// Create a new middleware error
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }

    /// Map the error code to an HTTP status
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "MISSING_TOKEN" | "INVALID_TOKEN" | "SESSION_EXPIRED" => StatusCode::UNAUTHORIZED,
            "FORBIDDEN" => StatusCode::FORBIDDEN,
            "INVALID_AUTH_HEADER" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MiddlewareError> for (StatusCode, axum::Json<MiddlewareError>) {
    fn from(err: MiddlewareError) -> Self {
        (err.status(), axum::Json(err))
    }
}
