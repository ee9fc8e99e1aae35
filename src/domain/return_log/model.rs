//! Return log model

use chrono::{DateTime, Utc};

/// Record that a vehicle came back from a rental.
///
/// Created unconfirmed when staff marks the booking returned; a second staff
/// action signs it off after inspection. The booking itself stays in the
/// returned status either way.
#[derive(Debug, Clone)]
pub struct ReturnLog {
    pub id: i32,
    pub booking_id: i32,
    pub returned_at: DateTime<Utc>,
    pub confirmed_by_staff: bool,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl ReturnLog {
    /// Fresh unconfirmed record for a booking that just came back
    pub fn new(booking_id: i32) -> Self {
        Self {
            id: 0, // assigned by storage
            booking_id,
            returned_at: Utc::now(),
            confirmed_by_staff: false,
            confirmed_at: None,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_unconfirmed() {
        let log = ReturnLog::new(42);
        assert_eq!(log.booking_id, 42);
        assert!(!log.confirmed_by_staff);
        assert!(log.confirmed_at.is_none());
    }
}
