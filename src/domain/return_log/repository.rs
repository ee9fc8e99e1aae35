//! Return log repository interface

use async_trait::async_trait;

use super::model::ReturnLog;
use crate::domain::DomainResult;

/// Persistence gateway for return records.
///
/// Creation happens inside `BookingRepository::record_return` so the record
/// commits together with the booking and vehicle updates.
#[async_trait]
pub trait ReturnLogRepository: Send + Sync {
    /// Find the return record for a booking
    async fn find_by_booking(&self, booking_id: i32) -> DomainResult<Option<ReturnLog>>;

    /// Sign off the record for `booking_id`. Conditional on it being still
    /// unconfirmed; returns `false` when there is no record to confirm or it
    /// was already signed off.
    async fn confirm(&self, booking_id: i32) -> DomainResult<bool>;
}
