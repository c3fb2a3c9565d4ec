//! HTTP implementation of the verification service client
//!
//! The verification backend exposes `PATCH /driver/verify`,
//! `PATCH /driver/unverify` and `DELETE /driver/delete`, each taking the
//! driver id in a JSON body and answering errors as `{"error": "..."}`.

use crate::error::{VerifyError, VerifyResult};
use crate::service::{ServiceHealth, VerificationService};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// Request body for all driver mutations
#[derive(Debug, Serialize)]
struct DriverIdBody {
    id: Uuid,
}

/// Error body the service answers with on failure
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP client for the deployed verification service
#[derive(Debug, Clone)]
pub struct HttpVerificationService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVerificationService {
    /// Create a new client against the given base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> VerifyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a driver mutation and map non-success responses to errors
    async fn send(&self, request: reqwest::RequestBuilder, driver_id: Uuid) -> VerifyResult<()> {
        let response = request.json(&DriverIdBody { id: driver_id }).send().await?;

        let status = response.status();
        if status.is_success() {
            debug!("Verification request for driver {} succeeded", driver_id);
            return Ok(());
        }

        // Surface the service's own error message when it sent one.
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| format!("request failed with status {status}"));

        warn!(
            "Verification request for driver {} rejected: {} ({})",
            driver_id, message, status
        );

        Err(VerifyError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl VerificationService for HttpVerificationService {
    async fn verify(&self, driver_id: Uuid) -> VerifyResult<()> {
        let request = self.client.patch(self.endpoint("driver/verify"));
        self.send(request, driver_id).await
    }

    async fn unverify(&self, driver_id: Uuid) -> VerifyResult<()> {
        let request = self.client.patch(self.endpoint("driver/unverify"));
        self.send(request, driver_id).await
    }

    async fn delete_driver(&self, driver_id: Uuid) -> VerifyResult<()> {
        let request = self.client.delete(self.endpoint("driver/delete"));
        self.send(request, driver_id).await
    }

    async fn health_check(&self) -> VerifyResult<ServiceHealth> {
        match self.client.get(self.endpoint("health")).send().await {
            Ok(response) if response.status().is_success() => {
                Ok(ServiceHealth::healthy("verification service reachable"))
            }
            Ok(response) => Ok(ServiceHealth::unhealthy(format!(
                "verification service returned {}",
                response.status()
            ))),
            Err(e) => Ok(ServiceHealth::unhealthy(format!(
                "verification service unreachable: {e}"
            ))),
        }
    }

    fn name(&self) -> &str {
        "http-verification"
    }
}
