//! Repository provider
//!
//! Unified access to all per-aggregate repositories, so consumers take a
//! single `Arc<dyn RepositoryProvider>` instead of four repository arcs.

use super::booking::BookingRepository;
use super::booking_archive::BookingArchiveRepository;
use super::return_log::ReturnLogRepository;
use super::vehicle::VehicleRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let car = repos.vehicles().find_by_id(3).await?;
///     let holds = repos.bookings().find_for_vehicle(3, &BookingStatus::ACTIVE).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn vehicles(&self) -> &dyn VehicleRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn booking_archive(&self) -> &dyn BookingArchiveRepository;
    fn return_logs(&self) -> &dyn ReturnLogRepository;
}
