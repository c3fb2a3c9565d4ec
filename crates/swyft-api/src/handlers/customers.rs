//! Customer listing endpoint

use crate::extractors::Pagination;
use crate::handlers::{ErrorResponse, bad_request, internal_error};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use swyft_database::CustomerQueries;
use tracing::{error, warn};
use uuid::Uuid;
use validator::Validate;

/// Query parameters for listing customers
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListCustomersQuery {
    /// Case-insensitive name substring
    #[validate(length(max = 100))]
    pub search: Option<String>,
}

/// Response for listing customers
#[derive(Debug, Serialize)]
pub struct ListCustomersResponse {
    /// Customer rows
    pub customers: Vec<CustomerSummary>,

    /// Total number of customers matching the filter
    pub total: i64,

    /// Number of rows returned
    pub count: usize,

    /// Current offset
    pub offset: i64,
}

/// Customer row for listings
#[derive(Debug, Serialize)]
pub struct CustomerSummary {
    /// Customer ID
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: Option<String>,
    /// Signup timestamp
    pub join_date: chrono::DateTime<chrono::Utc>,
}

/// List customers with name search and pagination
pub async fn list_customers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListCustomersQuery>,
    pagination: Pagination,
) -> Result<Json<ListCustomersResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(validation_errors) = query.validate() {
        warn!("Invalid query parameters: {:?}", validation_errors);
        return Err(bad_request("Invalid query parameters".to_string()));
    }

    let search = query.search.as_deref().filter(|s| !s.is_empty());
    let (limit, offset) = pagination.to_sql();

    let customers = match CustomerQueries::list(&state.pool, search, limit, offset).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Error fetching customers: {}", e);
            return Err(internal_error("Failed to retrieve customers"));
        }
    };

    let total = match CustomerQueries::count(&state.pool, search).await {
        Ok(count) => count,
        Err(e) => {
            warn!("Failed to get customer count: {}", e);
            customers.len() as i64
        }
    };

    let summaries: Vec<CustomerSummary> = customers
        .into_iter()
        .map(|customer| CustomerSummary {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            join_date: customer.join_date,
        })
        .collect();

    Ok(Json(ListCustomersResponse {
        count: summaries.len(),
        customers: summaries,
        total,
        offset,
    }))
}
