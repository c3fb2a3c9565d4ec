//! Driver listing and detail endpoints

use crate::extractors::Pagination;
use crate::handlers::{ErrorResponse, bad_request, internal_error, not_found};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use swyft_database::{DriverFilter, DriverQueries, models::DriverDb};
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for listing drivers
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListDriversQuery {
    /// Case-insensitive name substring
    #[validate(length(max = 100))]
    pub search: Option<String>,

    /// Filter by verification state
    pub verified: Option<bool>,

    /// Filter by online state
    pub online: Option<bool>,
}

/// Response for listing drivers
#[derive(Debug, Serialize)]
pub struct ListDriversResponse {
    /// Driver rows
    pub drivers: Vec<DriverSummary>,

    /// Total number of drivers matching the filter
    pub total: i64,

    /// Number of rows returned
    pub count: usize,

    /// Current offset
    pub offset: i64,

    /// Pagination info
    pub pagination: PaginationInfo,
}

/// Pagination information
#[derive(Debug, Serialize)]
pub struct PaginationInfo {
    /// Whether there are more results
    pub has_next: bool,

    /// Whether there are previous results
    pub has_prev: bool,
}

/// Driver row for listings
#[derive(Debug, Serialize)]
pub struct DriverSummary {
    /// Driver ID
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: Option<String>,
    /// Vehicle type
    pub car_type: Option<String>,
    /// KYC verification state
    pub verified: bool,
    /// Online state
    pub online: bool,
    /// Signup timestamp
    pub join_date: chrono::DateTime<chrono::Utc>,
}

impl From<&DriverDb> for DriverSummary {
    fn from(driver: &DriverDb) -> Self {
        Self {
            id: driver.id,
            name: driver.full_name(),
            email: driver.email.clone(),
            phone: driver.phone.clone(),
            car_type: driver.car_type.clone(),
            verified: driver.verified,
            online: driver.online,
            join_date: driver.join_date,
        }
    }
}

/// Driver detail
#[derive(Debug, Serialize)]
pub struct DriverDetail {
    /// Summary fields
    #[serde(flatten)]
    pub summary: DriverSummary,

    /// Last reported latitude
    pub latitude: Option<f64>,

    /// Last reported longitude
    pub longitude: Option<f64>,
}

/// List drivers with name search and pagination
pub async fn list_drivers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListDriversQuery>,
    pagination: Pagination,
) -> Result<Json<ListDriversResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(validation_errors) = query.validate() {
        warn!("Invalid query parameters: {:?}", validation_errors);
        return Err(bad_request("Invalid query parameters".to_string()));
    }

    let (limit, offset) = pagination.to_sql();
    let filter = DriverFilter {
        search: query.search.as_deref().filter(|s| !s.is_empty()),
        verified: query.verified,
        online: query.online,
        limit,
        offset,
    };

    info!(
        "Listing drivers: limit={}, offset={}, search={:?}",
        limit, offset, filter.search
    );

    let drivers = match DriverQueries::list(&state.pool, &filter).await {
        Ok(drivers) => drivers,
        Err(e) => {
            error!("Error fetching drivers: {}", e);
            return Err(internal_error("Failed to retrieve drivers"));
        }
    };

    let total = match DriverQueries::count(&state.pool, &filter).await {
        Ok(count) => count,
        Err(e) => {
            warn!("Failed to get driver count: {}", e);
            drivers.len() as i64
        }
    };

    let summaries: Vec<DriverSummary> = drivers.iter().map(DriverSummary::from).collect();

    Ok(Json(ListDriversResponse {
        count: summaries.len(),
        drivers: summaries,
        total,
        offset,
        pagination: PaginationInfo {
            has_next: pagination.has_next(total.max(0) as u64),
            has_prev: pagination.has_prev(),
        },
    }))
}

/// Fetch a single driver
pub async fn get_driver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DriverDetail>, (StatusCode, Json<ErrorResponse>)> {
    match swyft_database::get_driver(&state.pool, id).await {
        Ok(Some(driver)) => Ok(Json(DriverDetail {
            summary: DriverSummary::from(&driver),
            latitude: driver.latitude,
            longitude: driver.longitude,
        })),
        Ok(None) => Err(not_found("Driver")),
        Err(e) => {
            error!("Error fetching driver {}: {}", id, e);
            Err(internal_error("Failed to retrieve driver"))
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn sample_driver() -> DriverDb {
        DriverDb {
            id: Uuid::new_v4(),
            first_name: "Brian".to_string(),
            last_name: Some("Otieno".to_string()),
            email: "brian@swyft.example".to_string(),
            phone: None,
            car_type: Some("Pickup".to_string()),
            verified: true,
            online: false,
            join_date: Utc::now(),
            latitude: None,
            longitude: None,
            national_id_front: None,
            national_id_back: None,
            psv_badge: None,
            vehicle_registration: None,
            vehicle_picture_front: None,
            vehicle_picture_back: None,
            psv_car_insurance: None,
            inspection_report: None,
        }
    }

    #[test]
    fn test_summary_from_driver_row() {
        let driver = sample_driver();
        let summary = DriverSummary::from(&driver);

        assert_eq!(summary.name, "Brian Otieno");
        assert_eq!(summary.email, driver.email);
        assert!(summary.verified);
        assert!(!summary.online);
    }

    #[test]
    fn test_list_query_validation() {
        let valid = ListDriversQuery {
            search: Some("brian".to_string()),
            ..ListDriversQuery::default()
        };
        assert!(valid.validate().is_ok());

        let too_long = ListDriversQuery {
            search: Some("x".repeat(101)),
            ..ListDriversQuery::default()
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_detail_serialization_flattens_summary() {
        let driver = sample_driver();
        let detail = DriverDetail {
            summary: DriverSummary::from(&driver),
            latitude: Some(-1.28),
            longitude: Some(36.82),
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["name"], "Brian Otieno");
        assert_eq!(json["latitude"], -1.28);
        // Document paths never leak through this endpoint
        assert!(json.get("national_id_front").is_none());
    }
}
