//! Application services

mod booking;
mod expiry;
mod vehicle;
mod vehicle_locks;

pub use booking::{BookingFilter, BookingService, NewBooking};
pub use expiry::start_pending_expiry_task;
pub use vehicle::{NewVehicle, VehicleService, VehicleUpdate};
pub use vehicle_locks::VehicleLocks;

use crate::domain::{DomainError, DomainResult};

/// Who is performing an operation.
///
/// Populated at the HTTP boundary from gateway-injected headers and passed
/// down explicitly; services never read ambient session state. A default
/// actor is anonymous: no customer id, no staff rights.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actor {
    /// Customer identity, when the caller is an identified customer
    pub customer_id: Option<i32>,
    /// Staff flag, set by the upstream gateway
    pub staff: bool,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn customer(id: i32) -> Self {
        Self {
            customer_id: Some(id),
            staff: false,
        }
    }

    pub fn staff() -> Self {
        Self {
            customer_id: None,
            staff: true,
        }
    }

    /// Whether this actor is the given customer.
    pub fn owns(&self, customer_id: i32) -> bool {
        self.customer_id == Some(customer_id)
    }

    pub fn require_staff(&self, operation: &str) -> DomainResult<()> {
        if self.staff {
            Ok(())
        } else {
            Err(DomainError::NotEligible(format!(
                "{} is a staff operation",
                operation
            )))
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
