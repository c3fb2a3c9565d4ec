//! Session authentication middleware
//!
//! The original dashboard gated pages on a locally stored user object,
//! which any client could forge. Here the guard is server-side: every
//! `/api` request (except login) must carry a bearer token that maps to a
//! live session.

use crate::{middleware::MiddlewareError, state::AppState};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Authorization header name
const AUTH_HEADER: &str = "Authorization";

/// Paths that never require a session
const PUBLIC_PREFIXES: &[&str] = &["/health", "/ready", "/api/auth/login"];

/// Middleware validating the session token on protected routes
pub async fn session_auth(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, axum::Json<MiddlewareError>)> {
    let path = request.uri().path();
    if PUBLIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        return Ok(next.run(request).await);
    }

    // The guard can be disabled for tests and local development.
    if !state.config.auth.enable_auth {
        debug!("Session authentication disabled, skipping validation");
        return Ok(next.run(request).await);
    }

    let token = extract_token(&headers)?;

    let Some(session) = state.sessions.get(token) else {
        warn!("Rejected request to {} with unknown or expired token", path);
        return Err(MiddlewareError::new(
            "Session is invalid or has expired",
            "SESSION_EXPIRED",
        )
        .into());
    };

    debug!("Authenticated {} for {}", session.email, path);
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

/// Extract the bearer token from request headers
fn extract_token(
    headers: &HeaderMap,
) -> Result<Uuid, (StatusCode, axum::Json<MiddlewareError>)> {
    let Some(auth_header) = headers.get(AUTH_HEADER) else {
        return Err(MiddlewareError::new(
            "Session token required. Provide via Authorization: Bearer <token>",
            "MISSING_TOKEN",
        )
        .into());
    };

    let Ok(auth_str) = auth_header.to_str() else {
        return Err(MiddlewareError::new(
            "Invalid Authorization header encoding",
            "INVALID_AUTH_HEADER",
        )
        .into());
    };

    let Some(bearer_token) = auth_str.strip_prefix("Bearer ") else {
        return Err(MiddlewareError::new(
            "Invalid Authorization header format. Use 'Bearer <token>'",
            "INVALID_AUTH_HEADER",
        )
        .into());
    };

    bearer_token.parse::<Uuid>().map_err(|_| {
        MiddlewareError::new("Session token is not a valid token", "INVALID_TOKEN").into()
    })
}

/// Extract client IP from forwarding headers, if present
#[must_use]
pub fn client_ip(headers: &HeaderMap) -> Option<std::net::IpAddr> {
    let forwarded = headers.get("X-Forwarded-For")?.to_str().ok()?;
    forwarded
        .split(',')
        .next()
        .map(str::trim)
        .and_then(|ip| ip.parse().ok())
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use pretty_assertions::assert_eq;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_token_missing_header() {
        let err = extract_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
        assert_eq!(err.1.code, "MISSING_TOKEN");
    }

    #[test]
    fn test_extract_token_wrong_scheme() {
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        let err = extract_token(&headers).unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(err.1.code, "INVALID_AUTH_HEADER");
    }

    #[test]
    fn test_extract_token_not_a_uuid() {
        let headers = headers_with_auth("Bearer not-a-token");
        let err = extract_token(&headers).unwrap_err();
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
        assert_eq!(err.1.code, "INVALID_TOKEN");
    }

    #[test]
    fn test_extract_token_valid() {
        let token = Uuid::new_v4();
        let headers = headers_with_auth(&format!("Bearer {token}"));
        assert_eq!(extract_token(&headers).unwrap(), token);
    }

    #[test]
    fn test_public_prefixes_cover_login_and_health() {
        assert!(PUBLIC_PREFIXES.iter().any(|p| "/health".starts_with(p)));
        assert!(PUBLIC_PREFIXES.iter().any(|p| "/ready".starts_with(p)));
        assert!(
            PUBLIC_PREFIXES
                .iter()
                .any(|p| "/api/auth/login".starts_with(p))
        );
        assert!(!PUBLIC_PREFIXES.iter().any(|p| "/api/drivers".starts_with(p)));
    }

    #[test]
    fn test_client_ip_from_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Forwarded-For",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );

        assert_eq!(
            client_ip(&headers),
            Some("203.0.113.7".parse::<std::net::IpAddr>().unwrap())
        );
    }

    #[test]
    fn test_client_ip_missing_or_invalid() {
        assert!(client_ip(&HeaderMap::new()).is_none());

        let mut headers = HeaderMap::new();
        headers.insert("X-Forwarded-For", HeaderValue::from_static("garbage"));
        assert!(client_ip(&headers).is_none());
    }
}
