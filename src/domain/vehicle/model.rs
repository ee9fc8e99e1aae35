//! Vehicle domain entity

use chrono::{DateTime, Utc};

/// Availability projection of a vehicle.
///
/// While a booking is active, this field is owned by the booking state
/// machine: it is never set directly by staff edits, only derived from the
/// booking transition being applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleStatus {
    /// Free for new accepted bookings
    Available,
    /// An accepted booking holds the vehicle
    Booked,
    /// A confirmed booking holds the vehicle (out with the customer)
    NotAvailable,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Booked => "booked",
            Self::NotAvailable => "not-available",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(Self::Available),
            "booked" => Some(Self::Booked),
            "not-available" => Some(Self::NotAvailable),
            _ => None,
        }
    }
}

impl Default for VehicleStatus {
    fn default() -> Self {
        Self::Available
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rental vehicle
#[derive(Debug, Clone)]
pub struct Vehicle {
    /// Unique vehicle ID
    pub id: i32,
    /// Display name (e.g. "Chevrolet Cobalt")
    pub name: String,
    /// Category/type (sedan, SUV, minivan, ...)
    pub category: String,
    pub color: String,
    /// Current availability projection
    pub status: VehicleStatus,
    /// Price for the base included duration, in smallest currency unit
    pub base_price: i64,
    /// Days covered by the base price
    pub base_duration_days: i64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Whether the vehicle currently has no committed booking holding it.
    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }
}

// ── Tests ──────────────────────────────────────────────────────
