//! CORS layer construction

use axum::http::HeaderValue;
use swyft_core::Config;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Build the CORS layer from configuration
///
/// A `*` entry in the allowed origins opens the API to any origin; the
/// admin front-end deployments are listed explicitly in production.
#[must_use]
pub fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
