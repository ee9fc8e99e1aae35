//! Booking domain entity and status state machine

use chrono::{DateTime, Utc};

use crate::domain::span::DateSpan;
use crate::domain::vehicle::VehicleStatus;

/// Booking status
///
/// Legal path: `Pending → Accepted → Confirmed → Returned`, with the
/// alternate terminal `Pending → cancelled` (the row is archived and
/// removed, so a cancelled status never appears on a live booking).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Submitted by a customer, awaiting staff decision
    Pending,
    /// Staff accepted; the vehicle is held
    Accepted,
    /// Staff confirmed handover; the vehicle is out
    Confirmed,
    /// Staff marked the vehicle returned (terminal)
    Returned,
}

impl BookingStatus {
    /// Statuses that still hold a claim on the vehicle for conflict checks.
    /// Returned bookings never conflict.
    pub const ACTIVE: [BookingStatus; 3] = [Self::Pending, Self::Accepted, Self::Confirmed];

    /// Statuses under which the vehicle's status column belongs to this
    /// booking (a pending booking holds dates, not the vehicle itself).
    pub const COMMITTED: [BookingStatus; 2] = [Self::Accepted, Self::Confirmed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Confirmed => "confirmed",
            Self::Returned => "returned",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "confirmed" => Some(Self::Confirmed),
            "returned" => Some(Self::Returned),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle action applied to a booking.
///
/// Each action is legal from exactly one source status and carries the
/// paired vehicle-status change of the transition table. Anything else is
/// rejected by the orchestrator, never silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    /// Staff accept a pending booking
    Accept,
    /// Staff confirm handover of an accepted booking
    Confirm,
    /// Staff mark a confirmed booking's vehicle as physically back
    MarkReturned,
    /// Staff confirm the return record of a returned booking
    ConfirmReturn,
    /// The owning customer withdraws a pending booking
    Cancel,
}

impl BookingAction {
    /// The status a booking must currently have for this action to apply.
    pub fn source_status(&self) -> BookingStatus {
        match self {
            Self::Accept => BookingStatus::Pending,
            Self::Confirm => BookingStatus::Accepted,
            Self::MarkReturned => BookingStatus::Confirmed,
            Self::ConfirmReturn => BookingStatus::Returned,
            Self::Cancel => BookingStatus::Pending,
        }
    }

    /// The status the booking moves to. `None` for actions that do not
    /// change it: ConfirmReturn only flips the return record's flag, and
    /// Cancel archives and removes the row instead.
    pub fn target_status(&self) -> Option<BookingStatus> {
        match self {
            Self::Accept => Some(BookingStatus::Accepted),
            Self::Confirm => Some(BookingStatus::Confirmed),
            Self::MarkReturned => Some(BookingStatus::Returned),
            Self::ConfirmReturn | Self::Cancel => None,
        }
    }

    /// Paired vehicle status after this action, `None` when the vehicle is
    /// untouched. For Cancel the restore is additionally guarded by the
    /// orchestrator so it never clobbers a status owned by another booking.
    pub fn vehicle_status_after(&self) -> Option<VehicleStatus> {
        match self {
            Self::Accept => Some(VehicleStatus::Booked),
            Self::Confirm => Some(VehicleStatus::NotAvailable),
            Self::MarkReturned => Some(VehicleStatus::Available),
            Self::ConfirmReturn => None,
            Self::Cancel => Some(VehicleStatus::Available),
        }
    }

    /// Cancel belongs to the owning customer; everything else is staff-only.
    pub fn staff_only(&self) -> bool {
        !matches!(self, Self::Cancel)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Confirm => "confirm",
            Self::MarkReturned => "mark-returned",
            Self::ConfirmReturn => "confirm-return",
            Self::Cancel => "cancel",
        }
    }
}

impl std::fmt::Display for BookingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vehicle booking for an inclusive date span
#[derive(Debug, Clone)]
pub struct Booking {
    /// Unique booking ID
    pub id: i32,
    /// Owning customer
    pub customer_id: i32,
    pub vehicle_id: i32,
    /// Customer-stated purpose/notes
    pub purpose: String,
    pub span: DateSpan,
    pub status: BookingStatus,
    /// Computed at creation, in smallest currency unit
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        customer_id: i32,
        vehicle_id: i32,
        purpose: impl Into<String>,
        span: DateSpan,
        total_price: i64,
    ) -> Self {
        Self {
            id: 0, // assigned by storage
            customer_id,
            vehicle_id,
            purpose: purpose.into(),
            span,
            status: BookingStatus::Pending,
            total_price,
            created_at: Utc::now(),
        }
    }

    pub fn owned_by(&self, customer_id: i32) -> bool {
        self.customer_id == customer_id
    }

    /// Whether this booking still claims the vehicle's dates.
    pub fn holds_dates(&self) -> bool {
        self.status.is_active()
    }
}

// ── Tests ──────────────────────────────────────────────────────
