//! Test fixtures and sample data

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use swyft_core::context_error::{Result, ResultExt};
use uuid::Uuid;

/// Insert a driver row and return its id
pub async fn insert_driver(
    pool: &PgPool,
    first_name: &str,
    last_name: Option<&str>,
    online: bool,
    verified: bool,
) -> Result<Uuid> {
    let row: (Uuid,) = sqlx::query_as(
        r"
        INSERT INTO drivers (first_name, last_name, email, online, verified, car_type)
        VALUES ($1, $2, $3, $4, $5, 'Pickup')
        RETURNING id
        ",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(format!(
        "{}.{}@swyft.example",
        first_name.to_lowercase(),
        Uuid::new_v4().simple()
    ))
    .bind(online)
    .bind(verified)
    .fetch_one(pool)
    .await
    .with_context(|| "Failed to insert driver fixture")?;

    Ok(row.0)
}

/// Insert a driver with KYC document paths attached
pub async fn insert_driver_with_documents(pool: &PgPool, first_name: &str) -> Result<Uuid> {
    let id = insert_driver(pool, first_name, None, false, false).await?;

    sqlx::query(
        r"
        UPDATE drivers
        SET national_id_front = 'docs/id_front.jpg',
            national_id_back = 'docs/id_back.jpg',
            psv_badge = 'docs/badge.jpg'
        WHERE id = $1
        ",
    )
    .bind(id)
    .execute(pool)
    .await
    .with_context(|| "Failed to attach documents")?;

    Ok(id)
}

/// Insert a customer row and return its id
pub async fn insert_customer(pool: &PgPool, name: &str, joined_days_ago: i64) -> Result<Uuid> {
    let row: (Uuid,) = sqlx::query_as(
        r"
        INSERT INTO customers (name, email, join_date)
        VALUES ($1, $2, $3)
        RETURNING id
        ",
    )
    .bind(name)
    .bind(format!("{}@swyft.example", Uuid::new_v4().simple()))
    .bind(Utc::now() - Duration::days(joined_days_ago))
    .fetch_one(pool)
    .await
    .with_context(|| "Failed to insert customer fixture")?;

    Ok(row.0)
}

/// Insert an order row and return its id
pub async fn insert_order(
    pool: &PgPool,
    driver_id: Option<Uuid>,
    customer_id: Option<Uuid>,
    commission: Decimal,
    status: &str,
    package_type: &str,
) -> Result<Uuid> {
    let row: (Uuid,) = sqlx::query_as(
        r"
        INSERT INTO orders (driver_id, customer_id, commission, status, package_type)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        ",
    )
    .bind(driver_id)
    .bind(customer_id)
    .bind(commission)
    .bind(status)
    .bind(package_type)
    .fetch_one(pool)
    .await
    .with_context(|| "Failed to insert order fixture")?;

    Ok(row.0)
}

/// Insert an admin with a known password, returning (id, password)
pub async fn insert_admin(
    pool: &PgPool,
    email: &str,
    super_admin: bool,
) -> Result<(Uuid, String)> {
    let password = "correct-horse-battery".to_string();
    let hash = swyft_core::utils::sha256_hex(&password);

    let row: (Uuid,) = sqlx::query_as(
        r"
        INSERT INTO admins (email, password_hash, super_admin)
        VALUES ($1, $2, $3)
        RETURNING id
        ",
    )
    .bind(email)
    .bind(hash)
    .bind(super_admin)
    .fetch_one(pool)
    .await
    .with_context(|| "Failed to insert admin fixture")?;

    Ok((row.0, password))
}

/// Seed a small marketplace: two drivers, two customers, four orders
pub async fn seed_marketplace(pool: &PgPool) -> Result<()> {
    let brian = insert_driver(pool, "Brian", Some("Otieno"), true, true).await?;
    let achieng = insert_driver(pool, "Achieng", Some("Odhiambo"), false, false).await?;
    let wanjiru = insert_customer(pool, "Wanjiru Kamau", 3).await?;
    let kip = insert_customer(pool, "Kiprotich Kones", 40).await?;

    insert_order(
        pool,
        Some(brian),
        Some(wanjiru),
        Decimal::new(150_00, 2),
        "completed",
        "Furniture",
    )
    .await?;
    insert_order(
        pool,
        Some(brian),
        Some(kip),
        Decimal::new(75_50, 2),
        "completed",
        "Crates or Boxes",
    )
    .await?;
    insert_order(
        pool,
        Some(achieng),
        Some(wanjiru),
        Decimal::new(99_99, 2),
        "Cancelled",
        "Furniture",
    )
    .await?;
    insert_order(pool, None, None, Decimal::new(10_00, 2), "pending", "Container").await?;

    Ok(())
}
