//! Booking repository interface

use async_trait::async_trait;

use super::model::{Booking, BookingStatus};
use crate::domain::booking_archive::ArchivedBooking;
use crate::domain::vehicle::VehicleStatus;
use crate::domain::DomainResult;

/// Persistence gateway for bookings.
///
/// The three `advance_*`/`cancel_*` operations are composite units: each
/// applies its booking, vehicle, archive and return-log rows atomically and
/// reports `false` (instead of writing anything) when the booking is not in
/// the expected source status. That conditional check is what resolves two
/// racing transitions in favor of exactly one caller.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking; returns it with the assigned id
    async fn save(&self, booking: Booking) -> DomainResult<Booking>;

    /// Find booking by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>>;

    /// Find all live bookings
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Find all live bookings owned by a customer
    async fn find_by_customer(&self, customer_id: i32) -> DomainResult<Vec<Booking>>;

    /// Find all live bookings in a given status
    async fn find_by_status(&self, status: BookingStatus) -> DomainResult<Vec<Booking>>;

    /// Find a vehicle's bookings restricted to the given statuses.
    /// This is the conflict-detection scan.
    async fn find_for_vehicle(
        &self,
        vehicle_id: i32,
        statuses: &[BookingStatus],
    ) -> DomainResult<Vec<Booking>>;

    /// Whether any live booking references the vehicle (any status).
    /// Vehicle deletion is refused while this holds.
    async fn exists_for_vehicle(&self, vehicle_id: i32) -> DomainResult<bool>;

    /// Advance `booking_id` from `expected` to `next` and set the paired
    /// vehicle status, as one atomic unit. Returns `false` when the booking
    /// was not in `expected` (nothing written).
    async fn advance_with_vehicle(
        &self,
        booking_id: i32,
        expected: BookingStatus,
        next: BookingStatus,
        vehicle_id: i32,
        vehicle_status: VehicleStatus,
    ) -> DomainResult<bool>;

    /// The mark-returned unit: booking `expected` → returned, vehicle back
    /// to available, and a fresh unconfirmed return record, atomically.
    /// Returns `false` when the booking was not in `expected`.
    async fn record_return(
        &self,
        booking_id: i32,
        expected: BookingStatus,
        vehicle_id: i32,
    ) -> DomainResult<bool>;

    /// The cancel/expire unit: remove the live row (only if still in
    /// `expected`), insert the archival record, and optionally restore the
    /// vehicle to available, atomically. Returns the stored archive row, or
    /// `None` when the booking was not in `expected` (nothing written,
    /// nothing archived).
    async fn cancel_into_archive(
        &self,
        archived: ArchivedBooking,
        expected: BookingStatus,
        restore_vehicle: bool,
    ) -> DomainResult<Option<ArchivedBooking>>;
}
