//! Core verification service trait

use crate::error::VerifyResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Interface to the driver verification backend
///
/// KYC state transitions are owned by a separate service; this trait is the
/// only path through which the admin API flips a driver between verified
/// and unverified or removes a driver entirely. Implementations: the HTTP
/// client for the deployed service, and a mock for tests.
#[async_trait]
pub trait VerificationService: Send + Sync {
    /// Mark a driver as verified
    async fn verify(&self, driver_id: Uuid) -> VerifyResult<()>;

    /// Revoke a driver's verification
    async fn unverify(&self, driver_id: Uuid) -> VerifyResult<()>;

    /// Remove a driver from the platform
    async fn delete_driver(&self, driver_id: Uuid) -> VerifyResult<()>;

    /// Check whether the service is reachable and ready
    async fn health_check(&self) -> VerifyResult<ServiceHealth>;

    /// Get service name
    fn name(&self) -> &str;
}

/// Service health status
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ServiceHealth {
    /// Whether the service is healthy
    pub healthy: bool,

    /// Service status message
    pub status: String,

    /// Last health check timestamp
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl ServiceHealth {
    /// Create a healthy status
    pub fn healthy(status: impl Into<String>) -> Self {
        Self {
            healthy: true,
            status: status.into(),
            checked_at: chrono::Utc::now(),
        }
    }

    /// Create an unhealthy status
    pub fn unhealthy(status: impl Into<String>) -> Self {
        Self {
            healthy: false,
            status: status.into(),
            checked_at: chrono::Utc::now(),
        }
    }
}
