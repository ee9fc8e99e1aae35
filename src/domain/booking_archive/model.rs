//! Archived booking model
//!
//! When a pending booking is cancelled (or swept as expired) the live row is
//! removed and a snapshot lands here. Archive rows are terminal: they are
//! never transitioned, priced or conflict-checked again.

use chrono::{DateTime, NaiveDate, Utc};

use super::super::booking::Booking;

/// Why the booking left the live table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchivedStatus {
    /// Customer withdrew the hold before staff accepted it
    Cancelled,
    /// The hold sat unaccepted past its time-to-live and was swept
    Expired,
}

impl ArchivedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchivedStatus::Cancelled => "cancelled",
            ArchivedStatus::Expired => "expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cancelled" => Some(ArchivedStatus::Cancelled),
            "expired" => Some(ArchivedStatus::Expired),
            _ => None,
        }
    }
}

impl std::fmt::Display for ArchivedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of a booking at the moment it was cancelled or expired
#[derive(Debug, Clone)]
pub struct ArchivedBooking {
    pub id: i32,
    /// Id the booking had while it was live
    pub booking_id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub purpose: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: i64,
    pub status: ArchivedStatus,
    /// When the original booking was created
    pub booked_at: DateTime<Utc>,
    pub archived_at: DateTime<Utc>,
}

impl ArchivedBooking {
    /// Snapshot a live booking into its archival form
    pub fn from_booking(booking: &Booking, status: ArchivedStatus) -> Self {
        Self {
            id: 0, // assigned by storage
            booking_id: booking.id,
            customer_id: booking.customer_id,
            vehicle_id: booking.vehicle_id,
            purpose: booking.purpose.clone(),
            start_date: booking.span.start,
            end_date: booking.span.end,
            total_price: booking.total_price,
            status,
            booked_at: booking.created_at,
            archived_at: Utc::now(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
