//! Mock verification service for testing

use crate::error::{VerifyError, VerifyResult};
use crate::service::{ServiceHealth, VerificationService};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// A recorded call against the mock service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCall {
    /// `verify` was called for the driver
    Verify(Uuid),
    /// `unverify` was called for the driver
    Unverify(Uuid),
    /// `delete_driver` was called for the driver
    Delete(Uuid),
}

/// Mock verification service recording calls in memory
#[derive(Debug, Default)]
pub struct MockVerificationService {
    /// Calls received, in order
    calls: Arc<Mutex<Vec<MockCall>>>,

    /// Injected failure message
    fail_with: Option<String>,
}

impl MockVerificationService {
    /// Create a new mock service that accepts every request
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to reject every mutation
    #[must_use]
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    /// Calls received so far
    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: MockCall) -> VerifyResult<()> {
        if let Some(message) = &self.fail_with {
            return Err(VerifyError::Rejected {
                status: 500,
                message: message.clone(),
            });
        }
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        Ok(())
    }
}

#[async_trait]
impl VerificationService for MockVerificationService {
    async fn verify(&self, driver_id: Uuid) -> VerifyResult<()> {
        self.record(MockCall::Verify(driver_id))
    }

    async fn unverify(&self, driver_id: Uuid) -> VerifyResult<()> {
        self.record(MockCall::Unverify(driver_id))
    }

    async fn delete_driver(&self, driver_id: Uuid) -> VerifyResult<()> {
        self.record(MockCall::Delete(driver_id))
    }

    async fn health_check(&self) -> VerifyResult<ServiceHealth> {
        if self.fail_with.is_some() {
            Ok(ServiceHealth::unhealthy("mock configured to fail"))
        } else {
            Ok(ServiceHealth::healthy("mock"))
        }
    }

    fn name(&self) -> &str {
        "mock-verification"
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_mock_records_calls_in_order() {
        let mock = MockVerificationService::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        mock.verify(a).await.unwrap();
        mock.unverify(b).await.unwrap();
        mock.delete_driver(a).await.unwrap();

        assert_eq!(
            mock.calls(),
            vec![
                MockCall::Verify(a),
                MockCall::Unverify(b),
                MockCall::Delete(a),
            ]
        );
    }

    #[tokio::test]
    async fn test_mock_failure_injection() {
        let mock = MockVerificationService::new().with_failure("service down");
        let driver = Uuid::new_v4();

        let err = mock.verify(driver).await.unwrap_err();
        match err {
            VerifyError::Rejected { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "service down");
            }
            other => panic!("Expected Rejected, got {other:?}"),
        }

        // Failed calls are not recorded.
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let healthy = MockVerificationService::new();
        assert!(healthy.health_check().await.unwrap().healthy);

        let failing = MockVerificationService::new().with_failure("down");
        assert!(!failing.health_check().await.unwrap().healthy);
    }

    #[test]
    fn test_mock_name() {
        assert_eq!(MockVerificationService::new().name(), "mock-verification");
    }
}
