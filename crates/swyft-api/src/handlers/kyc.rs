//! Driver KYC review workflow
//!
//! Lists drivers with their submitted documents resolved to public
//! object-storage URLs, and delegates verify/unverify/delete decisions to
//! the external verification service. This service never flips the
//! `verified` column itself.

use crate::handlers::{ErrorResponse, bad_request, internal_error, not_found};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use swyft_core::DocumentKind;
use swyft_database::{DriverFilter, DriverQueries, models::DriverDb};
use swyft_core::config::StorageConfig;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for the KYC review list
#[derive(Debug, Default, Deserialize, Validate)]
pub struct KycListQuery {
    /// Case-insensitive name substring
    #[validate(length(max = 100))]
    pub search: Option<String>,

    /// Restrict to unverified drivers only
    #[serde(default)]
    pub unverified_only: bool,
}

/// KYC review list response
#[derive(Debug, Serialize)]
pub struct KycDriverList {
    /// Drivers under review
    pub drivers: Vec<KycDriver>,

    /// Number of rows returned
    pub count: usize,
}

/// A driver in the review list
#[derive(Debug, Serialize)]
pub struct KycDriver {
    /// Driver ID
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Verification state
    pub verified: bool,
    /// Submitted documents in carousel order; missing ones are omitted
    pub documents: Vec<DriverDocument>,
}

/// A submitted document with its public URL
#[derive(Debug, Serialize)]
pub struct DriverDocument {
    /// Document kind (wire name)
    pub kind: DocumentKind,
    /// Human-readable label
    pub label: &'static str,
    /// Public object-storage URL
    pub url: String,
}

/// Verification mutation response, echoing the new state
#[derive(Debug, Serialize)]
pub struct VerificationResponse {
    /// Driver ID
    pub id: Uuid,
    /// Verification state after the mutation
    pub verified: bool,
}

/// Deletion response
#[derive(Debug, Serialize)]
pub struct DeletionResponse {
    /// Driver ID
    pub id: Uuid,
    /// Confirmation message
    pub message: String,
}

/// Resolve a driver's submitted documents against the storage config
fn resolve_documents(driver: &DriverDb, storage: &StorageConfig) -> Vec<DriverDocument> {
    DocumentKind::ALL
        .iter()
        .filter_map(|&kind| {
            driver.document_path(kind).map(|path| DriverDocument {
                kind,
                label: kind.label(),
                url: storage.public_url(path),
            })
        })
        .collect()
}

/// List drivers for KYC review with resolved document URLs
pub async fn list_kyc_drivers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<KycListQuery>,
) -> Result<Json<KycDriverList>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(validation_errors) = query.validate() {
        warn!("Invalid query parameters: {:?}", validation_errors);
        return Err(bad_request("Invalid query parameters".to_string()));
    }

    let filter = DriverFilter {
        search: query.search.as_deref().filter(|s| !s.is_empty()),
        verified: if query.unverified_only { Some(false) } else { None },
        online: None,
        limit: state.config.api.max_page_size,
        offset: 0,
    };

    let rows = match DriverQueries::list(&state.pool, &filter).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Error fetching drivers: {}", e);
            return Err(internal_error("Failed to retrieve drivers"));
        }
    };

    let drivers: Vec<KycDriver> = rows
        .iter()
        .map(|driver| KycDriver {
            id: driver.id,
            name: driver.full_name(),
            email: driver.email.clone(),
            verified: driver.verified,
            documents: resolve_documents(driver, &state.config.storage),
        })
        .collect();

    Ok(Json(KycDriverList {
        count: drivers.len(),
        drivers,
    }))
}

/// Approve a driver's KYC submission
pub async fn verify_driver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<VerificationResponse>, (StatusCode, Json<ErrorResponse>)> {
    ensure_driver_exists(&state, id).await?;

    match state.verifier.verify(id).await {
        Ok(()) => {
            info!("Driver {} verified", id);
            Ok(Json(VerificationResponse { id, verified: true }))
        }
        Err(e) => Err(verification_failed(id, "verify", &e)),
    }
}

/// Reject or restrict a driver
pub async fn unverify_driver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<VerificationResponse>, (StatusCode, Json<ErrorResponse>)> {
    ensure_driver_exists(&state, id).await?;

    match state.verifier.unverify(id).await {
        Ok(()) => {
            info!("Driver {} unverified", id);
            Ok(Json(VerificationResponse {
                id,
                verified: false,
            }))
        }
        Err(e) => Err(verification_failed(id, "unverify", &e)),
    }
}

/// Remove a driver from the platform
pub async fn delete_driver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletionResponse>, (StatusCode, Json<ErrorResponse>)> {
    ensure_driver_exists(&state, id).await?;

    match state.verifier.delete_driver(id).await {
        Ok(()) => {
            info!("Driver {} deleted", id);
            Ok(Json(DeletionResponse {
                id,
                message: "Driver deleted".to_string(),
            }))
        }
        Err(e) => Err(verification_failed(id, "delete", &e)),
    }
}

async fn ensure_driver_exists(
    state: &Arc<AppState>,
    id: Uuid,
) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    match swyft_database::get_driver(&state.pool, id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found("Driver")),
        Err(e) => {
            error!("Error fetching driver {}: {}", id, e);
            Err(internal_error("Failed to retrieve driver"))
        }
    }
}

fn verification_failed(
    id: Uuid,
    action: &str,
    err: &swyft_verify::VerifyError,
) -> (StatusCode, Json<ErrorResponse>) {
    error!("Failed to {} driver {}: {}", action, id, err);
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error: format!("Failed to {action} driver"),
            code: "VERIFICATION_FAILED".to_string(),
        }),
    )
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn driver_with_documents() -> DriverDb {
        DriverDb {
            id: Uuid::new_v4(),
            first_name: "Achieng".to_string(),
            last_name: None,
            email: "achieng@swyft.example".to_string(),
            phone: None,
            car_type: None,
            verified: false,
            online: false,
            join_date: Utc::now(),
            latitude: None,
            longitude: None,
            national_id_front: Some("docs/id_front.jpg".to_string()),
            national_id_back: Some("docs/id_back.jpg".to_string()),
            psv_badge: None,
            vehicle_registration: None,
            vehicle_picture_front: Some("docs/car_front.jpg".to_string()),
            vehicle_picture_back: None,
            psv_car_insurance: None,
            inspection_report: None,
        }
    }

    fn storage() -> StorageConfig {
        StorageConfig {
            public_base_url: "https://abc.supabase.co".to_string(),
            bucket: "driver-images".to_string(),
        }
    }

    #[test]
    fn test_resolve_documents_omits_missing_and_keeps_order() {
        let driver = driver_with_documents();
        let documents = resolve_documents(&driver, &storage());

        let kinds: Vec<DocumentKind> = documents.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DocumentKind::NationalIdFront,
                DocumentKind::NationalIdBack,
                DocumentKind::VehiclePictureFront,
            ]
        );
    }

    #[test]
    fn test_resolve_documents_builds_public_urls() {
        let driver = driver_with_documents();
        let documents = resolve_documents(&driver, &storage());

        assert_eq!(
            documents[0].url,
            "https://abc.supabase.co/storage/v1/object/public/driver-images/docs/id_front.jpg"
        );
        assert_eq!(documents[0].label, "National ID (Front)");
    }

    #[test]
    fn test_resolve_documents_none_submitted() {
        let mut driver = driver_with_documents();
        driver.national_id_front = None;
        driver.national_id_back = None;
        driver.vehicle_picture_front = None;

        assert!(resolve_documents(&driver, &storage()).is_empty());
    }

    #[test]
    fn test_verification_failed_maps_to_bad_gateway() {
        let err = swyft_verify::VerifyError::Rejected {
            status: 503,
            message: "down".to_string(),
        };

        let (status, Json(body)) = verification_failed(Uuid::new_v4(), "verify", &err);
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.code, "VERIFICATION_FAILED");
        assert_eq!(body.error, "Failed to verify driver");
    }

    #[test]
    fn test_kyc_list_query_defaults() {
        let query: KycListQuery = serde_json::from_str("{}").unwrap();
        assert!(query.search.is_none());
        assert!(!query.unverified_only);
    }
}
