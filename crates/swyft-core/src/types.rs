//! Core data types for the Swyft admin service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Driver identifier type
pub type DriverId = Uuid;

/// Customer identifier type
pub type CustomerId = Uuid;

/// Order identifier type
pub type OrderId = Uuid;

/// A marketplace order as the aggregation helpers see it
///
/// Status is stored as free text in the backing table and compared
/// case-insensitively; the values this service cares about are
/// `completed` and `cancelled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier
    pub id: OrderId,

    /// Driver assigned to the order, if any
    pub driver_id: Option<DriverId>,

    /// Customer who placed the order, if recorded
    pub customer_id: Option<CustomerId>,

    /// Commission earned by the platform
    pub commission: Option<Decimal>,

    /// Order status text
    pub status: Option<String>,

    /// Declared package type
    pub package_type: Option<String>,

    /// When the order was created
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Whether the order status matches `expected`, case-insensitively
    #[must_use]
    pub fn status_is(&self, expected: &str) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(expected))
    }

    /// Commission with missing values counted as zero
    #[must_use]
    pub fn commission_or_zero(&self) -> Decimal {
        self.commission.unwrap_or_default()
    }
}

/// New admin account request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewAdmin {
    /// Admin email address
    #[validate(email)]
    pub email: String,

    /// Plaintext password, hashed before storage
    #[validate(length(min = 8, max = 128))]
    pub password: String,

    /// Grant super-admin privileges
    #[serde(default)]
    pub super_admin: bool,
}

/// The KYC documents a driver submits, in review-carousel order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// National ID, front side
    NationalIdFront,
    /// National ID, back side
    NationalIdBack,
    /// PSV badge
    PsvBadge,
    /// Vehicle registration certificate
    VehicleRegistration,
    /// Photo of the vehicle, front
    VehiclePictureFront,
    /// Photo of the vehicle, back
    VehiclePictureBack,
    /// PSV car insurance certificate
    PsvCarInsurance,
    /// Vehicle inspection report
    InspectionReport,
}

impl DocumentKind {
    /// All document kinds in review order
    pub const ALL: [Self; 8] = [
        Self::NationalIdFront,
        Self::NationalIdBack,
        Self::PsvBadge,
        Self::VehicleRegistration,
        Self::VehiclePictureFront,
        Self::VehiclePictureBack,
        Self::PsvCarInsurance,
        Self::InspectionReport,
    ];

    /// Stable wire name, matching the backing column
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NationalIdFront => "national_id_front",
            Self::NationalIdBack => "national_id_back",
            Self::PsvBadge => "psv_badge",
            Self::VehicleRegistration => "vehicle_registration",
            Self::VehiclePictureFront => "vehicle_picture_front",
            Self::VehiclePictureBack => "vehicle_picture_back",
            Self::PsvCarInsurance => "psv_car_insurance",
            Self::InspectionReport => "inspection_report",
        }
    }

    /// Human-readable label for review screens
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NationalIdFront => "National ID (Front)",
            Self::NationalIdBack => "National ID (Back)",
            Self::PsvBadge => "PSV Badge",
            Self::VehicleRegistration => "Vehicle Registration",
            Self::VehiclePictureFront => "Vehicle Picture (Front)",
            Self::VehiclePictureBack => "Vehicle Picture (Back)",
            Self::PsvCarInsurance => "PSV Car Insurance",
            Self::InspectionReport => "Inspection Report",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
