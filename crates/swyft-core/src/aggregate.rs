//! In-memory aggregation over fetched rows
//!
//! The dashboard pages fetch rows and derive every figure in memory rather
//! than pushing aggregation into SQL; these helpers keep that derivation in
//! one place so the handlers stay thin and the arithmetic stays testable.

use crate::types::Order;
use chrono::{DateTime, Datelike, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use uuid::Uuid;

/// Revenue summed per calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    /// Month key in `YYYY-M` form
    pub month: String,

    /// Commission sum for the month
    pub revenue: Decimal,
}

/// Commission summed per calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCommission {
    /// Day key in `YYYY-MM-DD` form
    pub day: String,

    /// Commission sum for the day
    pub commission: Decimal,
}

/// Signup count per calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    /// Day key in `YYYY-MM-DD` form
    pub day: String,

    /// Number of signups on the day
    pub count: u64,
}

/// Order count per package type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageCount {
    /// Declared package type
    pub package_type: String,

    /// Number of orders with that type
    pub count: u64,
}

/// Cancelled vs. not-cancelled order counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CancellationSplit {
    /// Orders whose status is `cancelled`
    pub cancelled: u64,

    /// Everything else
    pub not_cancelled: u64,
}

/// Weekly marketing KPI point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyKpi {
    /// Display label, `Week 1` (oldest) through `Week 4`
    pub week: String,

    /// Share of the week's new customers who placed an order that week,
    /// in percent
    pub conversion: f64,

    /// Share of the week's ordering customers who had also ordered before
    /// the week started, in percent
    pub retention: f64,
}

/// Sum of commission over completed orders
///
/// Status is compared case-insensitively and missing commission counts as
/// zero, matching how the overview page has always computed revenue.
#[must_use]
pub fn completed_revenue(orders: &[Order]) -> Decimal {
    orders
        .iter()
        .filter(|o| o.status_is("completed"))
        .map(Order::commission_or_zero)
        .sum()
}

/// Completed-order commission grouped by calendar month, oldest first
#[must_use]
pub fn monthly_revenue(orders: &[Order]) -> Vec<MonthlyRevenue> {
    let mut by_month: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for order in orders.iter().filter(|o| o.status_is("completed")) {
        let key = (order.created_at.year(), order.created_at.month());
        *by_month.entry(key).or_default() += order.commission_or_zero();
    }

    by_month
        .into_iter()
        .map(|((year, month), revenue)| MonthlyRevenue {
            month: format!("{year}-{month}"),
            revenue,
        })
        .collect()
}

/// Commission rows grouped by calendar day, oldest first
#[must_use]
pub fn daily_commissions(rows: &[(DateTime<Utc>, Decimal)]) -> Vec<DailyCommission> {
    let mut by_day: BTreeMap<String, Decimal> = BTreeMap::new();
    for (created_at, commission) in rows {
        let key = created_at.format("%Y-%m-%d").to_string();
        *by_day.entry(key).or_default() += *commission;
    }

    by_day
        .into_iter()
        .map(|(day, commission)| DailyCommission { day, commission })
        .collect()
}

/// Signup timestamps grouped by calendar day, oldest first
#[must_use]
pub fn signups_by_day(join_dates: &[DateTime<Utc>]) -> Vec<DailyCount> {
    let mut by_day: BTreeMap<String, u64> = BTreeMap::new();
    for joined in join_dates {
        let key = joined.format("%Y-%m-%d").to_string();
        *by_day.entry(key).or_default() += 1;
    }

    by_day
        .into_iter()
        .map(|(day, count)| DailyCount { day, count })
        .collect()
}

/// Cancelled vs. not-cancelled split over all orders
#[must_use]
pub fn cancellation_split(orders: &[Order]) -> CancellationSplit {
    let cancelled = orders.iter().filter(|o| o.status_is("cancelled")).count() as u64;
    CancellationSplit {
        cancelled,
        not_cancelled: orders.len() as u64 - cancelled,
    }
}

/// Order counts per package type, most frequent first
///
/// Orders without a package type are skipped. Ties break alphabetically so
/// the chart ordering is stable.
#[must_use]
pub fn package_distribution(orders: &[Order]) -> Vec<PackageCount> {
    let mut by_type: HashMap<&str, u64> = HashMap::new();
    for order in orders {
        if let Some(package_type) = order.package_type.as_deref() {
            *by_type.entry(package_type).or_default() += 1;
        }
    }

    let mut counts: Vec<PackageCount> = by_type
        .into_iter()
        .map(|(package_type, count)| PackageCount {
            package_type: package_type.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.package_type.cmp(&b.package_type))
    });
    counts
}

/// Average commission of completed orders, `None` when there are none
#[must_use]
pub fn average_order_value(orders: &[Order]) -> Option<Decimal> {
    let completed: Vec<&Order> = orders.iter().filter(|o| o.status_is("completed")).collect();
    if completed.is_empty() {
        return None;
    }
    let total: Decimal = completed.iter().map(|o| o.commission_or_zero()).sum();
    Some(total / Decimal::from(completed.len() as u64))
}

/// Weekly conversion and retention over the four weeks ending at `now`
///
/// `customers` pairs customer id with signup time; `orders` pairs the
/// ordering customer (when recorded) with order time. Orders with no
/// customer attached cannot contribute to either rate.
#[must_use]
pub fn weekly_kpis(
    now: DateTime<Utc>,
    customers: &[(Uuid, DateTime<Utc>)],
    orders: &[(Option<Uuid>, DateTime<Utc>)],
) -> Vec<WeeklyKpi> {
    const WEEKS: i64 = 4;

    let mut points = Vec::with_capacity(WEEKS as usize);
    for week in 1..=WEEKS {
        let start = now - Duration::weeks(WEEKS - week + 1);
        let end = now - Duration::weeks(WEEKS - week);

        let new_customers: HashSet<Uuid> = customers
            .iter()
            .filter(|(_, joined)| *joined >= start && *joined < end)
            .map(|(id, _)| *id)
            .collect();

        let week_orderers: HashSet<Uuid> = orders
            .iter()
            .filter(|(customer, created)| {
                customer.is_some() && *created >= start && *created < end
            })
            .filter_map(|(customer, _)| *customer)
            .collect();

        let converted = new_customers
            .iter()
            .filter(|id| week_orderers.contains(*id))
            .count();
        let conversion = if new_customers.is_empty() {
            0.0
        } else {
            converted as f64 / new_customers.len() as f64 * 100.0
        };

        let returning = week_orderers
            .iter()
            .filter(|id| {
                orders.iter().any(|(customer, created)| {
                    customer.as_ref() == Some(*id) && *created < start
                })
            })
            .count();
        let retention = if week_orderers.is_empty() {
            0.0
        } else {
            returning as f64 / week_orderers.len() as f64 * 100.0
        };

        points.push(WeeklyKpi {
            week: format!("Week {week}"),
            conversion,
            retention,
        });
    }

    points
}
