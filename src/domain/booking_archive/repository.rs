//! Booking archive repository interface

use async_trait::async_trait;

use super::model::ArchivedBooking;
use crate::domain::DomainResult;

/// Persistence gateway for the booking archive.
///
/// Inserting is done through `BookingRepository::cancel_into_archive` so the
/// archive row and the live-row removal commit together; this trait only
/// reads the history back.
#[async_trait]
pub trait BookingArchiveRepository: Send + Sync {
    /// All archive rows, newest first
    async fn find_all(&self) -> DomainResult<Vec<ArchivedBooking>>;

    /// Archive rows for one customer, newest first
    async fn find_by_customer(&self, customer_id: i32) -> DomainResult<Vec<ArchivedBooking>>;
}
