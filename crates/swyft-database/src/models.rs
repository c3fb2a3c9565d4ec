//! Database models for the Swyft admin service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use swyft_core::types::{DocumentKind, Order};
use uuid::Uuid;

/// Database model for drivers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DriverDb {
    /// Unique identifier
    pub id: Uuid,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: Option<String>,

    /// Email address
    pub email: String,

    /// Phone number
    pub phone: Option<String>,

    /// Vehicle type driven
    pub car_type: Option<String>,

    /// KYC verification flag
    pub verified: bool,

    /// Whether the driver is currently online
    pub online: bool,

    /// Signup timestamp
    pub join_date: DateTime<Utc>,

    /// Last reported latitude
    pub latitude: Option<f64>,

    /// Last reported longitude
    pub longitude: Option<f64>,

    /// National ID, front side (object path)
    pub national_id_front: Option<String>,

    /// National ID, back side (object path)
    pub national_id_back: Option<String>,

    /// PSV badge (object path)
    pub psv_badge: Option<String>,

    /// Vehicle registration (object path)
    pub vehicle_registration: Option<String>,

    /// Vehicle photo, front (object path)
    pub vehicle_picture_front: Option<String>,

    /// Vehicle photo, back (object path)
    pub vehicle_picture_back: Option<String>,

    /// PSV car insurance (object path)
    pub psv_car_insurance: Option<String>,

    /// Inspection report (object path)
    pub inspection_report: Option<String>,
}

impl DriverDb {
    /// Display name built from the name parts
    #[must_use]
    pub fn full_name(&self) -> String {
        swyft_core::utils::full_name(&self.first_name, self.last_name.as_deref())
    }

    /// Stored object path for a given document kind, if submitted
    #[must_use]
    pub fn document_path(&self, kind: DocumentKind) -> Option<&str> {
        let path = match kind {
            DocumentKind::NationalIdFront => &self.national_id_front,
            DocumentKind::NationalIdBack => &self.national_id_back,
            DocumentKind::PsvBadge => &self.psv_badge,
            DocumentKind::VehicleRegistration => &self.vehicle_registration,
            DocumentKind::VehiclePictureFront => &self.vehicle_picture_front,
            DocumentKind::VehiclePictureBack => &self.vehicle_picture_back,
            DocumentKind::PsvCarInsurance => &self.psv_car_insurance,
            DocumentKind::InspectionReport => &self.inspection_report,
        };
        path.as_deref().filter(|p| !p.is_empty())
    }
}

/// Database model for customers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CustomerDb {
    /// Unique identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Phone number
    pub phone: Option<String>,

    /// Signup timestamp
    pub join_date: DateTime<Utc>,
}

/// Database model for orders
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderDb {
    /// Unique identifier
    pub id: Uuid,

    /// Driver assigned to the order
    pub driver_id: Option<Uuid>,

    /// Customer who placed the order
    pub customer_id: Option<Uuid>,

    /// Platform commission
    pub commission: Option<rust_decimal::Decimal>,

    /// Status text
    pub status: Option<String>,

    /// Declared package type
    pub package_type: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<OrderDb> for Order {
    fn from(row: OrderDb) -> Self {
        Self {
            id: row.id,
            driver_id: row.driver_id,
            customer_id: row.customer_id,
            commission: row.commission,
            status: row.status,
            package_type: row.package_type,
            created_at: row.created_at,
        }
    }
}

/// Database model for admin accounts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminDb {
    /// Unique identifier
    pub id: Uuid,

    /// Email address
    pub email: String,

    /// Hex-encoded SHA-256 password digest
    pub password_hash: String,

    /// Super-admin flag
    pub super_admin: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Database model for login activity audit rows
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LoginActivityDb {
    /// Unique identifier
    pub id: Uuid,

    /// Admin who logged in
    pub admin_id: Uuid,

    /// Email at time of login
    pub email: String,

    /// Client address the login came from
    pub client_ip: Option<sqlx::types::ipnetwork::IpNetwork>,

    /// Login timestamp
    pub created_at: DateTime<Utc>,
}

/// Commission row joined with driver data
///
/// Produced by an inner join, so orders with no matching driver never
/// appear — the commissions page has always skipped those.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommissionRowDb {
    /// Driver display name
    pub driver_name: String,

    /// Driver vehicle type
    pub car_type: Option<String>,

    /// Commission on the order
    pub commission: Option<rust_decimal::Decimal>,

    /// Order creation timestamp
    pub created_at: DateTime<Utc>,
}
