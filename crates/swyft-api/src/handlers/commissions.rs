//! Commissions report endpoint
//!
//! Joins orders with their drivers (orders with no matching driver are
//! skipped) and derives the daily commission series. The name filter
//! applies to the table rows only; the series always covers every joined
//! row, as the commissions page has always drawn it.

use crate::handlers::{ErrorResponse, bad_request, internal_error};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use swyft_core::aggregate::{self, DailyCommission};
use swyft_core::utils::matches_query;
use swyft_database::OrderQueries;
use tracing::{error, warn};
use validator::Validate;

/// Query parameters for the commissions report
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CommissionsQuery {
    /// Case-insensitive driver-name substring for the table rows
    #[validate(length(max = 100))]
    pub search: Option<String>,
}

/// Commissions report response
#[derive(Debug, Serialize)]
pub struct CommissionsReport {
    /// Per-order commission rows with driver data (filtered)
    pub rows: Vec<CommissionRow>,

    /// Commission summed per day (all joined rows)
    pub daily_series: Vec<DailyCommission>,

    /// Number of rows returned
    pub count: usize,
}

/// A commission row
#[derive(Debug, Serialize)]
pub struct CommissionRow {
    /// Driver display name
    pub name: String,
    /// Driver vehicle type
    pub car_type: Option<String>,
    /// Commission on the order
    pub commission: Option<Decimal>,
    /// Order creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Build the commissions report
pub async fn commissions_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CommissionsQuery>,
) -> Result<Json<CommissionsReport>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(validation_errors) = query.validate() {
        warn!("Invalid query parameters: {:?}", validation_errors);
        return Err(bad_request("Invalid query parameters".to_string()));
    }

    let joined = match OrderQueries::commission_rows(&state.pool).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Error fetching commissions: {}", e);
            return Err(internal_error("Failed to retrieve commissions"));
        }
    };

    let series_input: Vec<(chrono::DateTime<chrono::Utc>, Decimal)> = joined
        .iter()
        .map(|row| (row.created_at, row.commission.unwrap_or_default()))
        .collect();
    let daily_series = aggregate::daily_commissions(&series_input);

    let search = query.search.as_deref().unwrap_or_default();
    let rows: Vec<CommissionRow> = joined
        .into_iter()
        .filter(|row| matches_query(row.driver_name.trim(), search))
        .map(|row| CommissionRow {
            name: row.driver_name.trim().to_string(),
            car_type: row.car_type,
            commission: row.commission,
            created_at: row.created_at,
        })
        .collect();

    Ok(Json(CommissionsReport {
        count: rows.len(),
        rows,
        daily_series,
    }))
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_query_validation() {
        let valid = CommissionsQuery {
            search: Some("brian".to_string()),
        };
        assert!(valid.validate().is_ok());

        let too_long = CommissionsQuery {
            search: Some("x".repeat(101)),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_commission_row_serialization() {
        let row = CommissionRow {
            name: "Brian Otieno".to_string(),
            car_type: None,
            commission: Some(Decimal::new(250_00, 2)),
            created_at: chrono::Utc::now(),
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["name"], "Brian Otieno");
        assert_eq!(json["commission"], "250.00");
        assert!(json["car_type"].is_null());
    }
}
