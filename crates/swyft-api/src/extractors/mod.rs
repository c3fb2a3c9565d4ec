//! Request extractors for the Swyft admin API

pub mod pagination;

pub use pagination::Pagination;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Rejection type for extractor failures
#[derive(Debug, Clone, Serialize)]
pub struct ExtractorError {
    /// Human-readable message
    pub error: String,
    /// Stable machine code
    pub code: String,
}

impl ExtractorError {
    /// Create a bad-request rejection
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: "INVALID_PARAMETERS".to_string(),
        }
    }
}

impl IntoResponse for ExtractorError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_shape() {
        let err = ExtractorError::bad_request("limit out of range");
        assert_eq!(err.code, "INVALID_PARAMETERS");
        assert_eq!(err.error, "limit out of range");
    }

    #[test]
    fn test_into_response_status() {
        let response = ExtractorError::bad_request("nope").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
