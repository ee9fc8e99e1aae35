//! Calendar date span for bookings
//!
//! Both ends are inclusive calendar dates with no time component. A booking
//! picked up and returned on the same day is a one-day span.

use chrono::NaiveDate;

use super::error::{DomainError, DomainResult};

/// Inclusive `[start, end]` date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    /// Build a span, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::Validation(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Number of calendar days covered, counting both ends.
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether two spans share at least one calendar day.
    ///
    /// A span ending on day X and another starting on day X overlap: the
    /// vehicle cannot be returned and handed over within the same day.
    pub fn overlaps(&self, other: &DateSpan) -> bool {
        !(self.end < other.start || self.start > other.end)
    }
}

impl std::fmt::Display for DateSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// ── Tests ──────────────────────────────────────────────────────
