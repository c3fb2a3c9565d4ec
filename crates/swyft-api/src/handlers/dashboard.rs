//! Overview page aggregates
//!
//! Single endpoint backing the landing dashboard: order and revenue
//! totals, the monthly revenue series, who is online right now, and the
//! past week's signups. Rows are fetched whole and aggregated in memory,
//! the same derivation the page itself used to run.

use crate::handlers::{ErrorResponse, internal_error};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use swyft_core::Order;
use swyft_core::aggregate::{self, DailyCount, MonthlyRevenue};
use swyft_database::{CustomerQueries, DriverQueries, OrderQueries};
use tracing::error;
use uuid::Uuid;

/// Window for the signup panels
const SIGNUP_WINDOW_DAYS: i64 = 7;

/// Overview response
#[derive(Debug, Serialize)]
pub struct DashboardOverview {
    /// Count of all orders ever placed
    pub total_orders: usize,

    /// Commission sum over completed orders
    pub total_revenue: Decimal,

    /// Completed-order revenue per month
    pub revenue_series: Vec<MonthlyRevenue>,

    /// Number of drivers online right now
    pub active_drivers: usize,

    /// Drivers online right now
    pub online_drivers: Vec<OnlineDriver>,

    /// Driver signups in the past week
    pub driver_signups: usize,

    /// Driver signups per day
    pub driver_signup_series: Vec<DailyCount>,

    /// Customer signups in the past week
    pub customer_signups: usize,

    /// Customer signups per day
    pub customer_signup_series: Vec<DailyCount>,

    /// When the aggregates were computed
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// An online driver entry
#[derive(Debug, Serialize)]
pub struct OnlineDriver {
    /// Driver ID
    pub id: Uuid,
    /// Display name
    pub name: String,
}

/// Build the overview aggregates
pub async fn overview(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardOverview>, (StatusCode, Json<ErrorResponse>)> {
    let orders: Vec<Order> = match OrderQueries::all(&state.pool).await {
        Ok(rows) => rows.into_iter().map(Order::from).collect(),
        Err(e) => {
            error!("Error fetching orders: {}", e);
            return Err(internal_error("Failed to retrieve orders"));
        }
    };

    let online = match DriverQueries::list_online(&state.pool).await {
        Ok(drivers) => drivers,
        Err(e) => {
            error!("Error fetching drivers: {}", e);
            return Err(internal_error("Failed to retrieve drivers"));
        }
    };

    let one_week_ago = Utc::now() - Duration::days(SIGNUP_WINDOW_DAYS);

    let driver_joins = match DriverQueries::signups_since(&state.pool, one_week_ago).await {
        Ok(dates) => dates,
        Err(e) => {
            error!("Error fetching driver sign ups: {}", e);
            return Err(internal_error("Failed to retrieve driver signups"));
        }
    };

    let customer_joins = match CustomerQueries::signups_since(&state.pool, one_week_ago).await {
        Ok(rows) => rows.into_iter().map(|(_, joined)| joined).collect::<Vec<_>>(),
        Err(e) => {
            error!("Error fetching customer sign ups: {}", e);
            return Err(internal_error("Failed to retrieve customer signups"));
        }
    };

    let online_drivers: Vec<OnlineDriver> = online
        .iter()
        .map(|driver| OnlineDriver {
            id: driver.id,
            name: driver.full_name(),
        })
        .collect();

    Ok(Json(DashboardOverview {
        total_orders: orders.len(),
        total_revenue: aggregate::completed_revenue(&orders),
        revenue_series: aggregate::monthly_revenue(&orders),
        active_drivers: online_drivers.len(),
        online_drivers,
        driver_signups: driver_joins.len(),
        driver_signup_series: aggregate::signups_by_day(&driver_joins),
        customer_signups: customer_joins.len(),
        customer_signup_series: aggregate::signups_by_day(&customer_joins),
        generated_at: Utc::now(),
    }))
}
