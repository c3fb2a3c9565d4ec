//! Admin login and logout
//!
//! Login checks credentials against the admins table, opens a server-side
//! session and records a login-activity audit row. The returned bearer
//! token is the only accepted authentication signal on protected routes.

use crate::handlers::{ErrorResponse, bad_request, internal_error};
use crate::middleware::auth::client_ip;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use swyft_core::utils::sha256_hex;
use swyft_database::{AdminQueries, LoginActivityQueries};
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

/// Login request body
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Admin email
    #[validate(email)]
    pub email: String,

    /// Admin password
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Login response body
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: Uuid,

    /// Session expiry timestamp
    pub expires_at: chrono::DateTime<chrono::Utc>,

    /// Authenticated admin profile
    pub admin: AdminProfile,
}

/// Admin profile embedded in the login response
#[derive(Debug, Serialize)]
pub struct AdminProfile {
    /// Admin ID
    pub id: Uuid,
    /// Admin email
    pub email: String,
    /// Super-admin flag
    pub super_admin: bool,
}

/// Logout response body
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Confirmation message
    pub message: String,
}

/// Authenticate an admin and open a session
pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(validation_errors) = request.validate() {
        warn!("Invalid login request: {:?}", validation_errors);
        return Err(bad_request("Invalid login request".to_string()));
    }

    let admin = match AdminQueries::find_by_email(&state.pool, &request.email).await {
        Ok(Some(admin)) => admin,
        Ok(None) => {
            warn!("Login attempt for unknown email: {}", request.email);
            return Err(invalid_credentials());
        }
        Err(e) => {
            error!("Failed to look up admin: {}", e);
            return Err(internal_error("Login failed"));
        }
    };

    // Constant shape either way; same response for wrong email and wrong
    // password so the endpoint does not confirm which emails exist.
    if sha256_hex(&request.password) != admin.password_hash {
        warn!("Failed login for {}", admin.email);
        return Err(invalid_credentials());
    }

    let session = state
        .sessions
        .create(admin.id, &admin.email, admin.super_admin);

    // The audit row is best effort; a full login_activity table must not
    // lock admins out.
    if let Err(e) =
        LoginActivityQueries::insert(&state.pool, admin.id, &admin.email, client_ip(&headers))
            .await
    {
        warn!("Failed to record login activity for {}: {}", admin.email, e);
    }

    info!("Admin {} logged in", admin.email);

    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at,
        admin: AdminProfile {
            id: admin.id,
            email: admin.email,
            super_admin: admin.super_admin,
        },
    }))
}

/// Close the current session
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, (StatusCode, Json<ErrorResponse>)> {
    let token = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| token.parse::<Uuid>().ok());

    let Some(token) = token else {
        return Err(bad_request("No session token provided".to_string()));
    };

    if state.sessions.remove(token) {
        info!("Session {} closed", token);
    }

    Ok(Json(LogoutResponse {
        message: "Logged out".to_string(),
    }))
}

fn invalid_credentials() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "Invalid email or password".to_string(),
            code: "INVALID_CREDENTIALS".to_string(),
        }),
    )
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            email: "ops@swyft.example".to_string(),
            password: "secret".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = LoginRequest {
            email: "nope".to_string(),
            password: "secret".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let empty_password = LoginRequest {
            email: "ops@swyft.example".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_invalid_credentials_shape() {
        let (status, Json(body)) = invalid_credentials();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.code, "INVALID_CREDENTIALS");
        assert_eq!(body.error, "Invalid email or password");
    }

    #[test]
    fn test_login_response_serialization_hides_nothing_extra() {
        let response = LoginResponse {
            token: Uuid::new_v4(),
            expires_at: chrono::Utc::now(),
            admin: AdminProfile {
                id: Uuid::new_v4(),
                email: "ops@swyft.example".to_string(),
                super_admin: false,
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("token").is_some());
        assert!(json["admin"].get("email").is_some());
        // The password hash must never appear in any auth response.
        assert!(json["admin"].get("password_hash").is_none());
    }
}
