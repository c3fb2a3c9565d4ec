//! Sales analytics endpoint
//!
//! The order table filter is applied in memory over the fetched rows while
//! the charts (package distribution, cancellation split) always cover the
//! full order set, matching how the sales page derived its figures.

use crate::handlers::{ErrorResponse, bad_request, internal_error};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use swyft_core::Order;
use swyft_core::aggregate::{self, CancellationSplit, PackageCount};
use swyft_core::utils::matches_query;
use swyft_database::OrderQueries;
use tracing::{error, warn};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for the sales report
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SalesReportQuery {
    /// Case-insensitive package-type substring for the table rows
    #[validate(length(max = 100))]
    pub package_type: Option<String>,
}

/// Sales report response
#[derive(Debug, Serialize)]
pub struct SalesReport {
    /// Order breakdown rows (filtered)
    pub orders: Vec<OrderBreakdownRow>,

    /// Orders per package type (all orders)
    pub package_distribution: Vec<PackageCount>,

    /// Cancelled vs. not-cancelled counts (all orders)
    pub cancellations: CancellationSplit,

    /// Count of all orders
    pub total_orders: usize,
}

/// Order row for the breakdown table
#[derive(Debug, Serialize)]
pub struct OrderBreakdownRow {
    /// Order ID
    pub id: Uuid,
    /// Declared package type
    pub package_type: Option<String>,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Status text
    pub status: Option<String>,
}

/// Build the sales report
pub async fn sales_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SalesReportQuery>,
) -> Result<Json<SalesReport>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(validation_errors) = query.validate() {
        warn!("Invalid query parameters: {:?}", validation_errors);
        return Err(bad_request("Invalid query parameters".to_string()));
    }

    let orders: Vec<Order> = match OrderQueries::all(&state.pool).await {
        Ok(rows) => rows.into_iter().map(Order::from).collect(),
        Err(e) => {
            error!("Error fetching orders: {}", e);
            return Err(internal_error("Failed to retrieve orders"));
        }
    };

    // Rows without a package type never show in the breakdown table, even
    // with an empty filter.
    let package_query = query.package_type.as_deref().unwrap_or_default();
    let rows: Vec<OrderBreakdownRow> = orders
        .iter()
        .filter(|order| {
            order
                .package_type
                .as_deref()
                .is_some_and(|package| matches_query(package, package_query))
        })
        .map(|order| OrderBreakdownRow {
            id: order.id,
            package_type: order.package_type.clone(),
            created_at: order.created_at,
            status: order.status.clone(),
        })
        .collect();

    Ok(Json(SalesReport {
        orders: rows,
        package_distribution: aggregate::package_distribution(&orders),
        cancellations: aggregate::cancellation_split(&orders),
        total_orders: orders.len(),
    }))
}
