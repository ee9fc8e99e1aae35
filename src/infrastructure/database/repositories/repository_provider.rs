//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::booking_archive::BookingArchiveRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::return_log::ReturnLogRepository;
use crate::domain::vehicle::VehicleRepository;

use super::booking_history_repository::SeaOrmBookingHistoryRepository;
use super::booking_repository::SeaOrmBookingRepository;
use super::car_repository::SeaOrmCarRepository;
use super::return_log_repository::SeaOrmReturnLogRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let car = repos.vehicles().find_by_id(3).await?;
/// let holds = repos.bookings().find_for_vehicle(3, &BookingStatus::ACTIVE).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    vehicles: SeaOrmCarRepository,
    bookings: SeaOrmBookingRepository,
    booking_archive: SeaOrmBookingHistoryRepository,
    return_logs: SeaOrmReturnLogRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            vehicles: SeaOrmCarRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            booking_archive: SeaOrmBookingHistoryRepository::new(db.clone()),
            return_logs: SeaOrmReturnLogRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn booking_archive(&self) -> &dyn BookingArchiveRepository {
        &self.booking_archive
    }

    fn return_logs(&self) -> &dyn ReturnLogRepository {
        &self.return_logs
    }
}
