//! API route definitions

use crate::{handlers, realtime, state::AppState};
use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

/// Build the dashboard API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Session endpoints
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        // Overview page
        .route("/api/dashboard/overview", get(handlers::dashboard::overview))
        // Driver listings
        .route("/api/drivers", get(handlers::drivers::list_drivers))
        .route("/api/drivers/:id", get(handlers::drivers::get_driver))
        // KYC review workflow
        .route("/api/kyc/drivers", get(handlers::kyc::list_kyc_drivers))
        .route(
            "/api/kyc/drivers/:id/verify",
            post(handlers::kyc::verify_driver),
        )
        .route(
            "/api/kyc/drivers/:id/unverify",
            post(handlers::kyc::unverify_driver),
        )
        .route("/api/kyc/drivers/:id", delete(handlers::kyc::delete_driver))
        // Customers page
        .route("/api/customers", get(handlers::customers::list_customers))
        // Reporting pages
        .route("/api/sales/report", get(handlers::sales::sales_report))
        .route(
            "/api/commissions/report",
            get(handlers::commissions::commissions_report),
        )
        .route("/api/marketing/kpis", get(handlers::marketing::marketing_kpis))
        // Super-admin cockpit
        .route(
            "/api/cockpit/overview",
            get(handlers::cockpit::cockpit_overview),
        )
        .route("/api/cockpit/admins", post(handlers::cockpit::create_admin))
        // Realtime change feed
        .route("/api/realtime/ws", get(realtime::ws_handler))
        // Service info
        .route("/api", get(api_info))
        .route("/", get(root_endpoint))
        // Apply basic middleware
        .layer(CompressionLayer::new())
}

/// Build health check routes (no authentication required)
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route(
            "/health/detailed",
            get(handlers::health::detailed_health_check),
        )
}

/// Combine all routes into a single router
pub fn build_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(api_routes())
        .merge(health_routes())
        // Fallback handler for unknown routes
        .fallback(not_found_handler)
}

/// Handle 404 Not Found errors
async fn not_found_handler() -> (axum::http::StatusCode, axum::Json<serde_json::Value>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        axum::Json(serde_json::json!({
            "error": "Not Found",
            "code": "ROUTE_NOT_FOUND",
            "message": "The requested endpoint does not exist"
        })),
    )
}

/// Root endpoint for basic connectivity
async fn root_endpoint() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "service": "Swyft Admin API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok"
    }))
}

/// API info endpoint
async fn api_info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "api": "Swyft Admin API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "login": "/api/auth/login",
            "dashboard": "/api/dashboard/overview",
            "drivers": "/api/drivers",
            "kyc": "/api/kyc/drivers",
            "customers": "/api/customers",
            "sales": "/api/sales/report",
            "commissions": "/api/commissions/report",
            "marketing": "/api/marketing/kpis",
            "cockpit": "/api/cockpit/overview",
            "realtime": "/api/realtime/ws",
            "health": "/health"
        }
    }))
}
