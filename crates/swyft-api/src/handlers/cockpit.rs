//! Super-admin cockpit: platform KPIs, login audit, admin management

use crate::handlers::{ErrorResponse, bad_request, internal_error};
use crate::session::Session;
use crate::state::AppState;
use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use swyft_core::Order;
use swyft_core::aggregate;
use swyft_core::types::NewAdmin;
use swyft_core::utils::sha256_hex;
use swyft_database::{
    AdminQueries, CustomerQueries, DriverQueries, LoginActivityQueries, OrderQueries,
};
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

/// How many audit rows the cockpit shows
const LOGIN_ACTIVITY_LIMIT: i64 = 20;

/// Signup KPI window
const SIGNUP_WINDOW_DAYS: i64 = 7;

/// Cockpit overview response
#[derive(Debug, Serialize)]
pub struct CockpitOverview {
    /// Platform KPIs
    pub kpis: CockpitKpis,

    /// Recent login audit rows
    pub login_activity: Vec<LoginActivityEntry>,

    /// Admin accounts
    pub admins: Vec<AdminSummary>,
}

/// Platform KPI block
#[derive(Debug, Serialize)]
pub struct CockpitKpis {
    /// Commission sum over completed orders
    pub total_revenue: Decimal,

    /// Count of all orders
    pub total_orders: usize,

    /// Average commission of completed orders
    pub average_order_value: Option<Decimal>,

    /// Count of cancelled orders
    pub cancelled_orders: u64,

    /// Drivers online right now
    pub active_drivers: usize,

    /// Driver signups in the past week
    pub new_driver_signups: usize,

    /// Customer signups in the past week
    pub new_customer_signups: usize,
}

/// A login audit row
#[derive(Debug, Serialize)]
pub struct LoginActivityEntry {
    /// Audit row ID
    pub id: Uuid,
    /// Admin who logged in
    pub admin_id: Uuid,
    /// Email at login time
    pub email: String,
    /// Login timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// An admin account row
#[derive(Debug, Serialize)]
pub struct AdminSummary {
    /// Admin ID
    pub id: Uuid,
    /// Email address
    pub email: String,
    /// Super-admin flag
    pub super_admin: bool,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Response for admin creation
#[derive(Debug, Serialize)]
pub struct AdminCreated {
    /// New admin ID
    pub id: Uuid,
    /// Email address
    pub email: String,
}

/// Build the cockpit overview
pub async fn cockpit_overview(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CockpitOverview>, (StatusCode, Json<ErrorResponse>)> {
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
    let driver_signups = match DriverQueries::signups_since(&state.pool, one_week_ago).await {
        Ok(dates) => dates.len(),
        Err(e) => {
            error!("Error fetching driver sign ups: {}", e);
            return Err(internal_error("Failed to retrieve driver signups"));
        }
    };
    let customer_signups = match CustomerQueries::signups_since(&state.pool, one_week_ago).await {
        Ok(rows) => rows.len(),
        Err(e) => {
            error!("Error fetching customer sign ups: {}", e);
            return Err(internal_error("Failed to retrieve customer signups"));
        }
    };

    let login_activity = match LoginActivityQueries::recent(&state.pool, LOGIN_ACTIVITY_LIMIT).await
    {
        Ok(rows) => rows
            .into_iter()
            .map(|row| LoginActivityEntry {
                id: row.id,
                admin_id: row.admin_id,
                email: row.email,
                created_at: row.created_at,
            })
            .collect(),
        Err(e) => {
            error!("Error fetching login activity: {}", e);
            return Err(internal_error("Failed to retrieve login activity"));
        }
    };

    let admins = match AdminQueries::list(&state.pool).await {
        Ok(rows) => rows
            .into_iter()
            .map(|admin| AdminSummary {
                id: admin.id,
                email: admin.email,
                super_admin: admin.super_admin,
                created_at: admin.created_at,
            })
            .collect(),
        Err(e) => {
            error!("Error fetching admins: {}", e);
            return Err(internal_error("Failed to retrieve admins"));
        }
    };

    let split = aggregate::cancellation_split(&orders);

    Ok(Json(CockpitOverview {
        kpis: CockpitKpis {
            total_revenue: aggregate::completed_revenue(&orders),
            total_orders: orders.len(),
            average_order_value: aggregate::average_order_value(&orders),
            cancelled_orders: split.cancelled,
            active_drivers: online.len(),
            new_driver_signups: driver_signups,
            new_customer_signups: customer_signups,
        },
        login_activity,
        admins,
    }))
}

/// Create a new admin account (super admins only)
pub async fn create_admin(
    State(state): State<Arc<AppState>>,
    session: Option<Extension<Session>>,
    Json(request): Json<NewAdmin>,
) -> Result<(StatusCode, Json<AdminCreated>), (StatusCode, Json<ErrorResponse>)> {
    // With the guard enabled a session extension is always present; only
    // super admins may mint accounts.
    if let Some(Extension(session)) = session {
        if !session.super_admin {
            warn!("{} attempted admin creation without privileges", session.email);
            return Err((
                StatusCode::FORBIDDEN,
                Json(ErrorResponse {
                    error: "Super-admin privileges required".to_string(),
                    code: "FORBIDDEN".to_string(),
                }),
            ));
        }
    }

    if let Err(validation_errors) = request.validate() {
        warn!("Invalid admin creation request: {:?}", validation_errors);
        return Err(bad_request("Invalid admin creation request".to_string()));
    }

    let password_hash = sha256_hex(&request.password);
    match AdminQueries::insert(&state.pool, &request.email, &password_hash, request.super_admin)
        .await
    {
        Ok(id) => {
            info!("Created admin {}", request.email);
            Ok((
                StatusCode::CREATED,
                Json(AdminCreated {
                    id,
                    email: request.email,
                }),
            ))
        }
        Err(swyft_core::Error::Database(msg)) if msg.contains("duplicate key") => Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "An admin with this email already exists".to_string(),
                code: "EMAIL_EXISTS".to_string(),
            }),
        )),
        Err(e) => {
            error!("Failed to create admin: {}", e);
            Err(internal_error("Failed to create admin"))
        }
    }
}
