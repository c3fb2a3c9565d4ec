//! Marketing KPI endpoint
//!
//! Weekly conversion and retention over the last four weeks, computed from
//! customer signups and their orders.

use crate::handlers::{ErrorResponse, internal_error};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{Duration, Utc};
use serde::Serialize;
use std::sync::Arc;
use swyft_core::aggregate::{self, WeeklyKpi};
use swyft_database::{CustomerQueries, OrderQueries};
use tracing::error;

/// KPI window
const KPI_WEEKS: i64 = 4;

/// Marketing KPI response
#[derive(Debug, Serialize)]
pub struct MarketingKpis {
    /// Weekly conversion/retention points, oldest first
    pub series: Vec<WeeklyKpi>,

    /// When the series was computed
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Build the weekly KPI series
pub async fn marketing_kpis(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MarketingKpis>, (StatusCode, Json<ErrorResponse>)> {
    let now = Utc::now();
    let window_start = now - Duration::weeks(KPI_WEEKS);

    let customers = match CustomerQueries::signups_since(&state.pool, window_start).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Error fetching customer sign ups: {}", e);
            return Err(internal_error("Failed to retrieve customers"));
        }
    };

    // Retention needs order history from before the window too, so fetch
    // the full set.
    let orders = match OrderQueries::all(&state.pool).await {
        Ok(rows) => rows
            .into_iter()
            .map(|order| (order.customer_id, order.created_at))
            .collect::<Vec<_>>(),
        Err(e) => {
            error!("Error fetching orders: {}", e);
            return Err(internal_error("Failed to retrieve orders"));
        }
    };

    Ok(Json(MarketingKpis {
        series: aggregate::weekly_kpis(now, &customers, &orders),
        generated_at: now,
    }))
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kpi_window_is_four_weeks() {
        assert_eq!(KPI_WEEKS, 4);
    }

    #[test]
    fn test_response_serialization() {
        let response = MarketingKpis {
            series: vec![WeeklyKpi {
                week: "Week 1".to_string(),
                conversion: 25.0,
                retention: 75.0,
            }],
            generated_at: Utc::now(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["series"][0]["week"], "Week 1");
        assert_eq!(json["series"][0]["conversion"], 25.0);
        assert_eq!(json["series"][0]["retention"], 75.0);
    }
}
