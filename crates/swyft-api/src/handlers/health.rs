//! Health check endpoints for monitoring and diagnostics

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Basic health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Readiness check response (simpler than health)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Service readiness status
    pub ready: bool,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Detailed health response including dependencies
#[derive(Debug, Clone, Serialize)]
pub struct DetailedHealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Database connectivity status
    pub database: DatabaseHealth,
    /// Verification service status
    pub verification: swyft_verify::ServiceHealth,
}

/// Database health status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseHealth {
    /// Database connection status
    pub connected: bool,
    /// Response time in milliseconds
    pub response_time_ms: u64,
    /// Maximum number of connections allowed
    pub max_connections: u32,
    /// Number of idle connections
    pub idle_connections: u32,
}

/// Basic health check endpoint for monitoring systems
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Readiness check endpoint for Kubernetes-style health checks
///
/// Returns 200 OK if the service is ready to accept traffic
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReadinessResponse>, StatusCode> {
    match sqlx::query("SELECT 1").fetch_one(&state.pool).await {
        Ok(_) => Ok(Json(ReadinessResponse {
            ready: true,
            timestamp: chrono::Utc::now(),
        })),
        Err(e) => {
            error!("Readiness check failed - database not accessible: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Detailed health check covering the database and the verification service
pub async fn detailed_health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DetailedHealthResponse>, StatusCode> {
    let database = match check_database_health(&state).await {
        Ok(health) => health,
        Err(e) => {
            error!("Database health check failed: {}", e);
            return Err(StatusCode::SERVICE_UNAVAILABLE);
        }
    };

    let verification = state
        .verifier
        .health_check()
        .await
        .unwrap_or_else(|e| swyft_verify::ServiceHealth::unhealthy(e.to_string()));

    let status = if database.connected && verification.healthy {
        "healthy"
    } else {
        "degraded"
    };

    Ok(Json(DetailedHealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        database,
        verification,
    }))
}

/// Check database health and gather pool metrics
async fn check_database_health(state: &Arc<AppState>) -> Result<DatabaseHealth, sqlx::Error> {
    let start_time = std::time::Instant::now();

    sqlx::query("SELECT 1 as health_check")
        .fetch_one(&state.pool)
        .await?;

    Ok(DatabaseHealth {
        connected: true,
        response_time_ms: start_time.elapsed().as_millis() as u64,
        max_connections: state.pool.options().get_max_connections(),
        idle_connections: state.pool.num_idle() as u32,
    })
}
