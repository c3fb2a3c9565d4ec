//! Request handlers for the Swyft admin API
//!
//! One module per dashboard page, plus auth and health.

pub mod auth;
pub mod cockpit;
pub mod commissions;
pub mod customers;
pub mod dashboard;
pub mod drivers;
pub mod health;
pub mod kyc;
pub mod marketing;
pub mod sales;

use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

/// Error response structure shared by all handlers
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

/// Build a 500 response with a generic message (details go to the log)
pub(crate) fn internal_error(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
            code: "DATABASE_ERROR".to_string(),
        }),
    )
}

/// Build a 404 response
pub(crate) fn not_found(resource: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("{resource} not found"),
            code: "NOT_FOUND".to_string(),
        }),
    )
}

/// Build a 400 response for invalid parameters
pub(crate) fn bad_request(message: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message,
            code: "INVALID_PARAMETERS".to_string(),
        }),
    )
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_internal_error_shape() {
        let (status, Json(body)) = internal_error("Failed to retrieve drivers");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "DATABASE_ERROR");
        assert_eq!(body.error, "Failed to retrieve drivers");
    }

    #[test]
    fn test_not_found_shape() {
        let (status, Json(body)) = not_found("Driver");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Driver not found");
        assert_eq!(body.code, "NOT_FOUND");
    }

    #[test]
    fn test_bad_request_shape() {
        let (status, Json(body)) = bad_request("limit out of range".to_string());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_PARAMETERS");
    }
}
