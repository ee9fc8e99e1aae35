//! In-memory storage implementation
//!
//! Backs every repository trait with `DashMap`s, for development and tests.
//! Conditional transitions take the booking's map entry first, so the
//! status check and the write happen under one shard lock.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::booking::{Booking, BookingRepository, BookingStatus};
use crate::domain::booking_archive::{ArchivedBooking, BookingArchiveRepository};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::return_log::{ReturnLog, ReturnLogRepository};
use crate::domain::vehicle::{Vehicle, VehicleRepository, VehicleStatus};
use crate::domain::{DomainError, DomainResult};

/// In-memory store for development and testing
pub struct InMemoryStore {
    vehicles: DashMap<i32, Vehicle>,
    bookings: DashMap<i32, Booking>,
    archive: DashMap<i32, ArchivedBooking>,
    return_logs: DashMap<i32, ReturnLog>,
    vehicle_counter: AtomicI32,
    booking_counter: AtomicI32,
    archive_counter: AtomicI32,
    return_log_counter: AtomicI32,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            vehicles: DashMap::new(),
            bookings: DashMap::new(),
            archive: DashMap::new(),
            return_logs: DashMap::new(),
            vehicle_counter: AtomicI32::new(1),
            booking_counter: AtomicI32::new(1),
            archive_counter: AtomicI32::new(1),
            return_log_counter: AtomicI32::new(1),
        }
    }

    fn set_vehicle_status(&self, vehicle_id: i32, status: VehicleStatus) {
        if let Some(mut vehicle) = self.vehicles.get_mut(&vehicle_id) {
            vehicle.status = status;
            vehicle.updated_at = Utc::now();
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryStore {
    fn vehicles(&self) -> &dyn VehicleRepository {
        self
    }

    fn bookings(&self) -> &dyn BookingRepository {
        self
    }

    fn booking_archive(&self) -> &dyn BookingArchiveRepository {
        self
    }

    fn return_logs(&self) -> &dyn ReturnLogRepository {
        self
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStore {
    async fn save(&self, mut vehicle: Vehicle) -> DomainResult<Vehicle> {
        let id = self.vehicle_counter.fetch_add(1, Ordering::SeqCst);
        vehicle.id = id;
        vehicle.created_at = Utc::now();
        vehicle.updated_at = Utc::now();
        self.vehicles.insert(id, vehicle.clone());
        Ok(vehicle)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        Ok(self.vehicles.get(&id).map(|v| v.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Vehicle>> {
        let mut all: Vec<Vehicle> = self.vehicles.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|v| v.id);
        Ok(all)
    }

    async fn find_by_status(&self, status: VehicleStatus) -> DomainResult<Vec<Vehicle>> {
        let mut matching: Vec<Vehicle> = self
            .vehicles
            .iter()
            .filter(|v| v.status == status)
            .map(|v| v.clone())
            .collect();
        matching.sort_by_key(|v| v.id);
        Ok(matching)
    }

    async fn update(&self, vehicle: Vehicle) -> DomainResult<()> {
        let mut existing = self
            .vehicles
            .get_mut(&vehicle.id)
            .ok_or(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: vehicle.id.to_string(),
            })?;

        // Status stays untouched: the booking state machine owns it
        existing.name = vehicle.name;
        existing.category = vehicle.category;
        existing.color = vehicle.color;
        existing.base_price = vehicle.base_price;
        existing.base_duration_days = vehicle.base_duration_days;
        existing.description = vehicle.description;
        existing.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.vehicles.remove(&id).ok_or(DomainError::NotFound {
            entity: "Vehicle",
            field: "id",
            value: id.to_string(),
        })?;
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn save(&self, mut booking: Booking) -> DomainResult<Booking> {
        let id = self.booking_counter.fetch_add(1, Ordering::SeqCst);
        booking.id = id;
        booking.created_at = Utc::now();
        self.bookings.insert(id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|b| b.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let mut all: Vec<Booking> = self.bookings.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|b| std::cmp::Reverse(b.id));
        Ok(all)
    }

    async fn find_by_customer(&self, customer_id: i32) -> DomainResult<Vec<Booking>> {
        let mut owned: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.customer_id == customer_id)
            .map(|b| b.clone())
            .collect();
        owned.sort_by_key(|b| std::cmp::Reverse(b.id));
        Ok(owned)
    }

    async fn find_by_status(&self, status: BookingStatus) -> DomainResult<Vec<Booking>> {
        let mut matching: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.status == status)
            .map(|b| b.clone())
            .collect();
        matching.sort_by_key(|b| std::cmp::Reverse(b.id));
        Ok(matching)
    }

    async fn find_for_vehicle(
        &self,
        vehicle_id: i32,
        statuses: &[BookingStatus],
    ) -> DomainResult<Vec<Booking>> {
        let mut matching: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.vehicle_id == vehicle_id && statuses.contains(&b.status))
            .map(|b| b.clone())
            .collect();
        matching.sort_by_key(|b| b.id);
        Ok(matching)
    }

    async fn exists_for_vehicle(&self, vehicle_id: i32) -> DomainResult<bool> {
        Ok(self.bookings.iter().any(|b| b.vehicle_id == vehicle_id))
    }

    async fn advance_with_vehicle(
        &self,
        booking_id: i32,
        expected: BookingStatus,
        next: BookingStatus,
        vehicle_id: i32,
        vehicle_status: VehicleStatus,
    ) -> DomainResult<bool> {
        {
            let Some(mut booking) = self.bookings.get_mut(&booking_id) else {
                return Ok(false);
            };
            if booking.status != expected {
                return Ok(false);
            }
            booking.status = next;
        }
        self.set_vehicle_status(vehicle_id, vehicle_status);
        Ok(true)
    }

    async fn record_return(
        &self,
        booking_id: i32,
        expected: BookingStatus,
        vehicle_id: i32,
    ) -> DomainResult<bool> {
        {
            let Some(mut booking) = self.bookings.get_mut(&booking_id) else {
                return Ok(false);
            };
            if booking.status != expected {
                return Ok(false);
            }
            booking.status = BookingStatus::Returned;
        }
        self.set_vehicle_status(vehicle_id, VehicleStatus::Available);

        let mut log = ReturnLog::new(booking_id);
        let id = self.return_log_counter.fetch_add(1, Ordering::SeqCst);
        log.id = id;
        self.return_logs.insert(id, log);
        Ok(true)
    }

    async fn cancel_into_archive(
        &self,
        mut archived: ArchivedBooking,
        expected: BookingStatus,
        restore_vehicle: bool,
    ) -> DomainResult<Option<ArchivedBooking>> {
        let removed = self
            .bookings
            .remove_if(&archived.booking_id, |_, b| b.status == expected);
        if removed.is_none() {
            return Ok(None);
        }

        let id = self.archive_counter.fetch_add(1, Ordering::SeqCst);
        archived.id = id;
        self.archive.insert(id, archived.clone());

        if restore_vehicle {
            self.set_vehicle_status(archived.vehicle_id, VehicleStatus::Available);
        }
        Ok(Some(archived))
    }
}

#[async_trait]
impl BookingArchiveRepository for InMemoryStore {
    async fn find_all(&self) -> DomainResult<Vec<ArchivedBooking>> {
        let mut all: Vec<ArchivedBooking> = self.archive.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|a| std::cmp::Reverse(a.id));
        Ok(all)
    }

    async fn find_by_customer(&self, customer_id: i32) -> DomainResult<Vec<ArchivedBooking>> {
        let mut owned: Vec<ArchivedBooking> = self
            .archive
            .iter()
            .filter(|a| a.customer_id == customer_id)
            .map(|a| a.clone())
            .collect();
        owned.sort_by_key(|a| std::cmp::Reverse(a.id));
        Ok(owned)
    }
}

#[async_trait]
impl ReturnLogRepository for InMemoryStore {
    async fn find_by_booking(&self, booking_id: i32) -> DomainResult<Option<ReturnLog>> {
        Ok(self
            .return_logs
            .iter()
            .find(|l| l.booking_id == booking_id)
            .map(|l| l.clone()))
    }

    async fn confirm(&self, booking_id: i32) -> DomainResult<bool> {
        let Some(mut log) = self
            .return_logs
            .iter_mut()
            .find(|l| l.booking_id == booking_id)
        else {
            return Ok(false);
        };
        if log.confirmed_by_staff {
            return Ok(false);
        }
        log.confirmed_by_staff = true;
        log.confirmed_at = Some(Utc::now());
        Ok(true)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::span::DateSpan;

    fn vehicle(name: &str) -> Vehicle {
        Vehicle {
            id: 0,
            name: name.to_string(),
            category: "sedan".to_string(),
            color: "white".to_string(),
            status: VehicleStatus::Available,
            base_price: 500_000,
            base_duration_days: 3,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn span(s: &str, e: &str) -> DateSpan {
        DateSpan::new(
            s.parse().expect("valid date"),
            e.parse().expect("valid date"),
        )
        .expect("valid span")
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids() {
        let store = InMemoryStore::new();
        let a = store.vehicles().save(vehicle("Cobalt")).await.expect("save");
        let b = store.vehicles().save(vehicle("Malibu")).await.expect("save");
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn vehicle_update_does_not_touch_status() {
        let store = InMemoryStore::new();
        let saved = store.vehicles().save(vehicle("Cobalt")).await.expect("save");
        store.set_vehicle_status(saved.id, VehicleStatus::Booked);

        let mut edited = saved.clone();
        edited.color = "black".to_string();
        edited.status = VehicleStatus::Available; // must be ignored
        store.vehicles().update(edited).await.expect("update");

        let found = store
            .vehicles()
            .find_by_id(saved.id)
            .await
            .expect("find")
            .expect("exists");
        assert_eq!(found.color, "black");
        assert_eq!(found.status, VehicleStatus::Booked);
    }

    #[tokio::test]
    async fn advance_is_conditional_on_expected_status() {
        let store = InMemoryStore::new();
        let car = store.vehicles().save(vehicle("Cobalt")).await.expect("save");
        let booking = store
            .bookings()
            .save(Booking::new(1, car.id, "trip", span("2024-06-01", "2024-06-03"), 500_000))
            .await
            .expect("save");

        let first = store
            .bookings()
            .advance_with_vehicle(
                booking.id,
                BookingStatus::Pending,
                BookingStatus::Accepted,
                car.id,
                VehicleStatus::Booked,
            )
            .await
            .expect("advance");
        assert!(first);

        // Second attempt from the same source status loses
        let second = store
            .bookings()
            .advance_with_vehicle(
                booking.id,
                BookingStatus::Pending,
                BookingStatus::Accepted,
                car.id,
                VehicleStatus::Booked,
            )
            .await
            .expect("advance");
        assert!(!second);

        let car = store
            .vehicles()
            .find_by_id(car.id)
            .await
            .expect("find")
            .expect("exists");
        assert_eq!(car.status, VehicleStatus::Booked);
    }

    #[tokio::test]
    async fn record_return_writes_booking_vehicle_and_log() {
        let store = InMemoryStore::new();
        let car = store.vehicles().save(vehicle("Cobalt")).await.expect("save");
        let booking = store
            .bookings()
            .save(Booking::new(1, car.id, "trip", span("2024-06-01", "2024-06-03"), 500_000))
            .await
            .expect("save");
        store
            .bookings()
            .advance_with_vehicle(
                booking.id,
                BookingStatus::Pending,
                BookingStatus::Accepted,
                car.id,
                VehicleStatus::Booked,
            )
            .await
            .expect("accept");
        store
            .bookings()
            .advance_with_vehicle(
                booking.id,
                BookingStatus::Accepted,
                BookingStatus::Confirmed,
                car.id,
                VehicleStatus::NotAvailable,
            )
            .await
            .expect("confirm");

        let done = store
            .bookings()
            .record_return(booking.id, BookingStatus::Confirmed, car.id)
            .await
            .expect("return");
        assert!(done);

        let booking = store
            .bookings()
            .find_by_id(booking.id)
            .await
            .expect("find")
            .expect("exists");
        assert_eq!(booking.status, BookingStatus::Returned);

        let car = store
            .vehicles()
            .find_by_id(car.id)
            .await
            .expect("find")
            .expect("exists");
        assert_eq!(car.status, VehicleStatus::Available);

        let log = store
            .return_logs()
            .find_by_booking(booking.id)
            .await
            .expect("find")
            .expect("log exists");
        assert!(!log.confirmed_by_staff);
    }

    #[tokio::test]
    async fn cancel_removes_live_row_and_archives_it() {
        let store = InMemoryStore::new();
        let car = store.vehicles().save(vehicle("Cobalt")).await.expect("save");
        let booking = store
            .bookings()
            .save(Booking::new(9, car.id, "trip", span("2024-06-01", "2024-06-03"), 500_000))
            .await
            .expect("save");

        let archived = ArchivedBooking::from_booking(&booking, crate::domain::ArchivedStatus::Cancelled);
        let stored = store
            .bookings()
            .cancel_into_archive(archived, BookingStatus::Pending, true)
            .await
            .expect("cancel");
        assert!(stored.is_some());

        assert!(store
            .bookings()
            .find_by_id(booking.id)
            .await
            .expect("find")
            .is_none());

        let rows = store.booking_archive().find_by_customer(9).await.expect("archive");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].booking_id, booking.id);
    }

    #[tokio::test]
    async fn confirm_return_flips_once() {
        let store = InMemoryStore::new();
        let car = store.vehicles().save(vehicle("Cobalt")).await.expect("save");
        let booking = store
            .bookings()
            .save(Booking::new(1, car.id, "trip", span("2024-06-01", "2024-06-03"), 500_000))
            .await
            .expect("save");
        store
            .bookings()
            .record_return(booking.id, BookingStatus::Pending, car.id)
            .await
            .expect("return");

        assert!(store.return_logs().confirm(booking.id).await.expect("confirm"));
        assert!(!store.return_logs().confirm(booking.id).await.expect("second confirm"));

        let log = store
            .return_logs()
            .find_by_booking(booking.id)
            .await
            .expect("find")
            .expect("exists");
        assert!(log.confirmed_by_staff);
        assert!(log.confirmed_at.is_some());
    }
}
