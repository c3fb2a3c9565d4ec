//! Database query operations for the Swyft admin service

use crate::models::{AdminDb, CommissionRowDb, CustomerDb, DriverDb, LoginActivityDb, OrderDb};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use swyft_core::{Error, Result};
use uuid::Uuid;

/// Driver table operations
pub struct DriverQueries;

impl DriverQueries {
    /// List drivers with optional name search and pagination
    ///
    /// The search is a case-insensitive substring match over the display
    /// name, like the search box has always behaved.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(pool: &PgPool, filter: &DriverFilter<'_>) -> Result<Vec<DriverDb>> {
        let query = r"
            SELECT * FROM drivers
            WHERE ($1::text IS NULL
                   OR first_name || ' ' || COALESCE(last_name, '') ILIKE '%' || $1 || '%')
              AND ($2::boolean IS NULL OR verified = $2)
              AND ($3::boolean IS NULL OR online = $3)
            ORDER BY join_date DESC
            LIMIT $4 OFFSET $5
        ";

        sqlx::query_as::<_, DriverDb>(query)
            .bind(filter.search)
            .bind(filter.verified)
            .bind(filter.online)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Count drivers matching a filter
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(pool: &PgPool, filter: &DriverFilter<'_>) -> Result<i64> {
        let query = r"
            SELECT COUNT(*) as count FROM drivers
            WHERE ($1::text IS NULL
                   OR first_name || ' ' || COALESCE(last_name, '') ILIKE '%' || $1 || '%')
              AND ($2::boolean IS NULL OR verified = $2)
              AND ($3::boolean IS NULL OR online = $3)
        ";

        let row = sqlx::query(query)
            .bind(filter.search)
            .bind(filter.verified)
            .bind(filter.online)
            .fetch_one(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.get("count"))
    }

    /// Find a driver by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the driver is not found.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<DriverDb> {
        let query = "SELECT * FROM drivers WHERE id = $1";

        sqlx::query_as::<_, DriverDb>(query)
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => Error::NotFound {
                    resource: format!("Driver with ID {id}"),
                },
                _ => Error::Database(e.to_string()),
            })
    }

    /// List drivers currently online, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_online(pool: &PgPool) -> Result<Vec<DriverDb>> {
        let query = r"
            SELECT * FROM drivers
            WHERE online = true
            ORDER BY first_name, last_name
        ";

        sqlx::query_as::<_, DriverDb>(query)
            .fetch_all(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Signup timestamps for drivers who joined on or after `since`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn signups_since(
        pool: &PgPool,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>> {
        let query = "SELECT join_date FROM drivers WHERE join_date >= $1";

        let rows = sqlx::query(query)
            .bind(since)
            .fetch_all(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(rows.iter().map(|row| row.get("join_date")).collect())
    }
}

/// Customer table operations
pub struct CustomerQueries;

impl CustomerQueries {
    /// List customers with optional name search and pagination
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CustomerDb>> {
        let query = r"
            SELECT * FROM customers
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
            ORDER BY join_date DESC
            LIMIT $2 OFFSET $3
        ";

        sqlx::query_as::<_, CustomerDb>(query)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Count customers matching an optional name search
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(pool: &PgPool, search: Option<&str>) -> Result<i64> {
        let query = r"
            SELECT COUNT(*) as count FROM customers
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
        ";

        let row = sqlx::query(query)
            .bind(search)
            .fetch_one(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.get("count"))
    }

    /// Customers who joined on or after `since`, with their signup times
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn signups_since(
        pool: &PgPool,
        since: DateTime<Utc>,
    ) -> Result<Vec<(Uuid, DateTime<Utc>)>> {
        let query = "SELECT id, join_date FROM customers WHERE join_date >= $1";

        let rows = sqlx::query(query)
            .bind(since)
            .fetch_all(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(rows
            .iter()
            .map(|row| (row.get("id"), row.get("join_date")))
            .collect())
    }
}

/// Order table operations
pub struct OrderQueries;

impl OrderQueries {
    /// Fetch every order
    ///
    /// The reporting pages derive their aggregates in memory from the full
    /// order set, so this intentionally has no pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn all(pool: &PgPool) -> Result<Vec<OrderDb>> {
        let query = "SELECT * FROM orders ORDER BY created_at DESC";

        sqlx::query_as::<_, OrderDb>(query)
            .fetch_all(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Orders created on or after `since`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn created_since(pool: &PgPool, since: DateTime<Utc>) -> Result<Vec<OrderDb>> {
        let query = r"
            SELECT * FROM orders
            WHERE created_at >= $1
            ORDER BY created_at DESC
        ";

        sqlx::query_as::<_, OrderDb>(query)
            .bind(since)
            .fetch_all(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Count all orders
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM orders")
            .fetch_one(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.get("count"))
    }

    /// Commission rows joined with driver name and vehicle type
    ///
    /// Inner join: orders without a matching driver are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn commission_rows(pool: &PgPool) -> Result<Vec<CommissionRowDb>> {
        let query = r"
            SELECT
                d.first_name || ' ' || COALESCE(d.last_name, '') AS driver_name,
                d.car_type,
                o.commission,
                o.created_at
            FROM orders o
            INNER JOIN drivers d ON d.id = o.driver_id
            ORDER BY o.created_at DESC
        ";

        sqlx::query_as::<_, CommissionRowDb>(query)
            .fetch_all(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }
}

/// Admin table operations
pub struct AdminQueries;

impl AdminQueries {
    /// Find an admin by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<AdminDb>> {
        let query = "SELECT * FROM admins WHERE email = $1";

        sqlx::query_as::<_, AdminDb>(query)
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// List all admins, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(pool: &PgPool) -> Result<Vec<AdminDb>> {
        let query = "SELECT * FROM admins ORDER BY created_at DESC";

        sqlx::query_as::<_, AdminDb>(query)
            .fetch_all(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Insert a new admin account
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (including on a
    /// duplicate email).
    pub async fn insert(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        super_admin: bool,
    ) -> Result<Uuid> {
        let query = r"
            INSERT INTO admins (email, password_hash, super_admin)
            VALUES ($1, $2, $3)
            RETURNING id
        ";

        let row = sqlx::query(query)
            .bind(email)
            .bind(password_hash)
            .bind(super_admin)
            .fetch_one(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.get("id"))
    }
}

/// Login activity audit operations
pub struct LoginActivityQueries;

impl LoginActivityQueries {
    /// Record a login
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn insert(
        pool: &PgPool,
        admin_id: Uuid,
        email: &str,
        client_ip: Option<std::net::IpAddr>,
    ) -> Result<Uuid> {
        let query = r"
            INSERT INTO login_activity (admin_id, email, client_ip)
            VALUES ($1, $2, $3)
            RETURNING id
        ";

        let row = sqlx::query(query)
            .bind(admin_id)
            .bind(email)
            .bind(client_ip.map(sqlx::types::ipnetwork::IpNetwork::from))
            .fetch_one(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.get("id"))
    }

    /// Most recent login activity
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<LoginActivityDb>> {
        let query = r"
            SELECT * FROM login_activity
            ORDER BY created_at DESC
            LIMIT $1
        ";

        sqlx::query_as::<_, LoginActivityDb>(query)
            .bind(limit)
            .fetch_all(pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))
    }
}

/// Parameter struct for filtering drivers
#[derive(Debug, Default)]
pub struct DriverFilter<'a> {
    /// Case-insensitive name substring
    pub search: Option<&'a str>,
    /// Verification state filter
    pub verified: Option<bool>,
    /// Online state filter
    pub online: Option<bool>,
    /// Maximum number of results
    pub limit: i64,
    /// Result offset for pagination
    pub offset: i64,
}

// Convenience wrapper functions for handler ergonomics

/// List drivers with a filter (wrapper)
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_drivers(pool: &PgPool, filter: &DriverFilter<'_>) -> Result<Vec<DriverDb>> {
    DriverQueries::list(pool, filter).await
}

/// Count drivers with a filter (wrapper)
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn count_drivers(pool: &PgPool, filter: &DriverFilter<'_>) -> Result<i64> {
    DriverQueries::count(pool, filter).await
}

/// Get a driver by ID, `None` when missing (wrapper)
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn get_driver(pool: &PgPool, id: Uuid) -> Result<Option<DriverDb>> {
    match DriverQueries::find_by_id(pool, id).await {
        Ok(driver) => Ok(Some(driver)),
        Err(Error::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// List online drivers (wrapper)
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_online_drivers(pool: &PgPool) -> Result<Vec<DriverDb>> {
    DriverQueries::list_online(pool).await
}

/// Fetch all orders (wrapper)
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn all_orders(pool: &PgPool) -> Result<Vec<OrderDb>> {
    OrderQueries::all(pool).await
}

/// Count all orders (wrapper)
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn count_orders(pool: &PgPool) -> Result<i64> {
    OrderQueries::count(pool).await
}
