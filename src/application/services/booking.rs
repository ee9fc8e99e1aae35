//! Booking lifecycle service
//!
//! Orchestrates reservation creation and every lifecycle transition. All
//! writes for a vehicle run under that vehicle's advisory lock, and the
//! storage-level updates are conditional on the expected source status, so
//! two racing callers resolve to exactly one winner with no retries.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use super::vehicle_locks::VehicleLocks;
use super::Actor;
use crate::domain::{
    ArchivedBooking, ArchivedStatus, Booking, BookingAction, BookingStatus, DateSpan, DomainError,
    DomainResult, PricingPolicy, RentalQuote, RepositoryProvider, ReturnLog,
};

/// Fields accepted when a customer places a booking
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub purpose: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Optional filters for booking listings
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub vehicle_id: Option<i32>,
}

/// Service for the booking lifecycle
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    locks: VehicleLocks,
    pricing: PricingPolicy,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, pricing: PricingPolicy) -> Self {
        Self {
            repos,
            locks: VehicleLocks::new(),
            pricing,
        }
    }

    /// Place a new booking: validate, check the date span against every
    /// active booking of the vehicle, price it, persist it as `pending`.
    ///
    /// The conflict check and the insert run under the vehicle's lock, so
    /// two overlapping requests arriving together cannot both pass.
    pub async fn create(&self, actor: &Actor, req: NewBooking) -> DomainResult<Booking> {
        if !actor.staff && !actor.owns(req.customer_id) {
            return Err(DomainError::NotEligible(
                "a booking can only be created for the requesting customer".into(),
            ));
        }
        if req.purpose.trim().is_empty() {
            return Err(DomainError::Validation("purpose must not be empty".into()));
        }
        let span = DateSpan::new(req.start_date, req.end_date)?;

        let vehicle = self
            .repos
            .vehicles()
            .find_by_id(req.vehicle_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: req.vehicle_id.to_string(),
            })?;

        let _guard = self.locks.lock(vehicle.id).await;

        let active = self
            .repos
            .bookings()
            .find_for_vehicle(vehicle.id, &BookingStatus::ACTIVE)
            .await?;
        if let Some(conflict) = active.iter().find(|b| b.span.overlaps(&span)) {
            metrics::counter!("booking_conflicts_total").increment(1);
            return Err(DomainError::SlotUnavailable(format!(
                "vehicle {} is already taken for {} by booking {}",
                vehicle.id, conflict.span, conflict.id
            )));
        }

        let quote = self
            .pricing
            .quote(vehicle.base_price, vehicle.base_duration_days, &span);
        let booking = Booking::new(
            req.customer_id,
            vehicle.id,
            req.purpose.trim(),
            span,
            quote.total_price,
        );
        let saved = self.repos.bookings().save(booking).await?;

        metrics::counter!("bookings_created_total").increment(1);
        info!(
            booking_id = saved.id,
            customer_id = saved.customer_id,
            vehicle_id = saved.vehicle_id,
            total_price = saved.total_price,
            span = %saved.span,
            "Booking created"
        );
        Ok(saved)
    }

    /// Price a span against a vehicle without persisting anything.
    pub async fn quote(
        &self,
        vehicle_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<RentalQuote> {
        let span = DateSpan::new(start, end)?;
        let vehicle = self
            .repos
            .vehicles()
            .find_by_id(vehicle_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: vehicle_id.to_string(),
            })?;
        Ok(self
            .pricing
            .quote(vehicle.base_price, vehicle.base_duration_days, &span))
    }

    /// Staff accept a pending booking; the vehicle becomes `booked`.
    pub async fn accept(&self, actor: &Actor, id: i32) -> DomainResult<Booking> {
        self.advance(actor, id, BookingAction::Accept).await
    }

    /// Staff confirm handover; the vehicle becomes `not-available`.
    pub async fn confirm(&self, actor: &Actor, id: i32) -> DomainResult<Booking> {
        self.advance(actor, id, BookingAction::Confirm).await
    }

    /// Staff record the vehicle back: booking `returned`, vehicle
    /// `available`, and an unconfirmed return record, in one unit.
    pub async fn mark_returned(&self, actor: &Actor, id: i32) -> DomainResult<Booking> {
        self.advance(actor, id, BookingAction::MarkReturned).await
    }

    /// Staff sign off the return record after inspecting the vehicle.
    pub async fn confirm_return(&self, actor: &Actor, id: i32) -> DomainResult<ReturnLog> {
        actor.require_staff("return confirmation")?;

        let booking = self.load(id).await?;
        if booking.status != BookingStatus::Returned {
            return Err(DomainError::NotEligible(format!(
                "cannot confirm the return of a {} booking",
                booking.status
            )));
        }

        let log = self
            .repos
            .return_logs()
            .find_by_booking(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "ReturnLog",
                field: "booking_id",
                value: id.to_string(),
            })?;
        if log.confirmed_by_staff || !self.repos.return_logs().confirm(id).await? {
            return Err(DomainError::NotEligible(format!(
                "return of booking {} is already confirmed",
                id
            )));
        }

        metrics::counter!("booking_transitions_total", "action" => BookingAction::ConfirmReturn.as_str())
            .increment(1);
        info!(booking_id = id, "Return confirmed");

        self.repos
            .return_logs()
            .find_by_booking(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "ReturnLog",
                field: "booking_id",
                value: id.to_string(),
            })
    }

    /// Cancel a pending booking: the live row is removed and archived as
    /// `cancelled`. Owning customer (or staff on their behalf) only.
    ///
    /// The vehicle is restored to `available` only when no committed
    /// booking owns its status, so a cancel never clobbers another
    /// booking's hold.
    pub async fn cancel(&self, actor: &Actor, id: i32) -> DomainResult<ArchivedBooking> {
        let booking = self.load(id).await?;
        if !actor.staff && !actor.owns(booking.customer_id) {
            return Err(DomainError::NotEligible(
                "only the owning customer can cancel this booking".into(),
            ));
        }

        let _guard = self.locks.lock(booking.vehicle_id).await;
        // The status may have moved while we waited for the lock
        let booking = self.load(id).await?;
        if booking.status != BookingStatus::Pending {
            return Err(DomainError::NotEligible(format!(
                "cannot cancel a {} booking (only pending holds can be cancelled)",
                booking.status
            )));
        }

        let committed = self
            .repos
            .bookings()
            .find_for_vehicle(booking.vehicle_id, &BookingStatus::COMMITTED)
            .await?;
        let restore_vehicle = committed.is_empty();

        let archived = ArchivedBooking::from_booking(&booking, ArchivedStatus::Cancelled);
        let stored = self
            .repos
            .bookings()
            .cancel_into_archive(archived, BookingStatus::Pending, restore_vehicle)
            .await?
            .ok_or_else(|| {
                DomainError::NotEligible(format!(
                    "booking {} changed status while the cancel was in flight",
                    id
                ))
            })?;

        metrics::counter!("booking_transitions_total", "action" => BookingAction::Cancel.as_str())
            .increment(1);
        info!(
            booking_id = id,
            customer_id = booking.customer_id,
            restore_vehicle,
            "Booking cancelled and archived"
        );
        Ok(stored)
    }

    /// Fetch one booking. Customers see their own; staff see all.
    pub async fn get(&self, actor: &Actor, id: i32) -> DomainResult<Booking> {
        let booking = self.load(id).await?;
        if !actor.staff && !actor.owns(booking.customer_id) {
            // Another customer's booking looks like a missing one
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(booking)
    }

    /// List bookings. Staff see all (with filters); customers their own.
    pub async fn list(&self, actor: &Actor, filter: BookingFilter) -> DomainResult<Vec<Booking>> {
        let mut bookings = if actor.staff {
            match filter.status {
                Some(status) => self.repos.bookings().find_by_status(status).await?,
                None => self.repos.bookings().find_all().await?,
            }
        } else {
            let Some(customer_id) = actor.customer_id else {
                return Err(DomainError::NotEligible(
                    "listing bookings requires an identified caller".into(),
                ));
            };
            let mut own = self.repos.bookings().find_by_customer(customer_id).await?;
            if let Some(status) = filter.status {
                own.retain(|b| b.status == status);
            }
            own
        };

        if let Some(vehicle_id) = filter.vehicle_id {
            bookings.retain(|b| b.vehicle_id == vehicle_id);
        }
        Ok(bookings)
    }

    /// Archived (cancelled/expired) bookings. Staff see all; customers
    /// their own.
    pub async fn history(&self, actor: &Actor) -> DomainResult<Vec<ArchivedBooking>> {
        if actor.staff {
            self.repos.booking_archive().find_all().await
        } else if let Some(customer_id) = actor.customer_id {
            self.repos.booking_archive().find_by_customer(customer_id).await
        } else {
            Err(DomainError::NotEligible(
                "listing booking history requires an identified caller".into(),
            ))
        }
    }

    /// The return record of a booking (owner or staff).
    pub async fn return_log(&self, actor: &Actor, booking_id: i32) -> DomainResult<ReturnLog> {
        let booking = self.get(actor, booking_id).await?;
        self.repos
            .return_logs()
            .find_by_booking(booking.id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "ReturnLog",
                field: "booking_id",
                value: booking_id.to_string(),
            })
    }

    /// Archive every pending booking older than `ttl` as `expired`.
    /// Returns how many were swept. Used by the background sweeper.
    pub async fn expire_stale_pending(&self, ttl: chrono::Duration) -> DomainResult<usize> {
        let cutoff = Utc::now() - ttl;
        let stale: Vec<Booking> = self
            .repos
            .bookings()
            .find_by_status(BookingStatus::Pending)
            .await?
            .into_iter()
            .filter(|b| b.created_at <= cutoff)
            .collect();

        let mut expired = 0;
        for booking in stale {
            let _guard = self.locks.lock(booking.vehicle_id).await;
            let committed = self
                .repos
                .bookings()
                .find_for_vehicle(booking.vehicle_id, &BookingStatus::COMMITTED)
                .await?;

            let archived = ArchivedBooking::from_booking(&booking, ArchivedStatus::Expired);
            let swept = self
                .repos
                .bookings()
                .cancel_into_archive(archived, BookingStatus::Pending, committed.is_empty())
                .await?;
            if swept.is_some() {
                metrics::counter!("booking_transitions_total", "action" => "expire").increment(1);
                info!(booking_id = booking.id, "Stale pending booking expired");
                expired += 1;
            }
        }
        Ok(expired)
    }

    async fn load(&self, id: i32) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            })
    }

    /// Shared path of the three forward transitions (accept, confirm,
    /// mark-returned).
    async fn advance(&self, actor: &Actor, id: i32, action: BookingAction) -> DomainResult<Booking> {
        if action.staff_only() {
            actor.require_staff(action.as_str())?;
        }

        let booking = self.load(id).await?;
        let _guard = self.locks.lock(booking.vehicle_id).await;
        // The status may have moved while we waited for the lock
        let booking = self.load(id).await?;

        let expected = action.source_status();
        if booking.status != expected {
            return Err(DomainError::NotEligible(format!(
                "cannot {} a {} booking (requires {})",
                action, booking.status, expected
            )));
        }

        if action == BookingAction::Accept {
            // First accept wins: a vehicle carries at most one committed
            // booking, and its status belongs to that booking until it is
            // returned. Disjoint dates do not help here.
            let committed = self
                .repos
                .bookings()
                .find_for_vehicle(booking.vehicle_id, &BookingStatus::COMMITTED)
                .await?;
            if let Some(holder) = committed.iter().find(|b| b.id != booking.id) {
                metrics::counter!("booking_conflicts_total").increment(1);
                return Err(DomainError::SlotUnavailable(format!(
                    "vehicle {} is already held for {} by booking {}",
                    booking.vehicle_id, holder.span, holder.id
                )));
            }
        }

        let applied = match action {
            BookingAction::MarkReturned => {
                self.repos
                    .bookings()
                    .record_return(booking.id, expected, booking.vehicle_id)
                    .await?
            }
            _ => match (action.target_status(), action.vehicle_status_after()) {
                (Some(next), Some(vehicle_status)) => {
                    self.repos
                        .bookings()
                        .advance_with_vehicle(
                            booking.id,
                            expected,
                            next,
                            booking.vehicle_id,
                            vehicle_status,
                        )
                        .await?
                }
                _ => {
                    return Err(DomainError::NotEligible(format!(
                        "{} is not a forward transition",
                        action
                    )))
                }
            },
        };
        if !applied {
            return Err(DomainError::NotEligible(format!(
                "booking {} changed status while the {} was in flight",
                id, action
            )));
        }

        metrics::counter!("booking_transitions_total", "action" => action.as_str()).increment(1);
        info!(booking_id = id, action = %action, "Booking transition applied");
        self.load(id).await
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Vehicle, VehicleStatus};
    use crate::infrastructure::storage::InMemoryStore;

    fn test_vehicle(name: &str) -> Vehicle {
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

    async fn setup() -> (Arc<BookingService>, Arc<InMemoryStore>, Vehicle) {
        let store = Arc::new(InMemoryStore::new());
        let vehicle = store
            .vehicles()
            .save(test_vehicle("Cobalt"))
            .await
            .expect("save vehicle");
        let service = Arc::new(BookingService::new(store.clone(), PricingPolicy::default()));
        (service, store, vehicle)
    }

    fn request(customer_id: i32, vehicle_id: i32, start: &str, end: &str) -> NewBooking {
        NewBooking {
            customer_id,
            vehicle_id,
            purpose: "business trip".into(),
            start_date: start.parse().expect("valid date"),
            end_date: end.parse().expect("valid date"),
        }
    }

    async fn vehicle_status(store: &InMemoryStore, id: i32) -> VehicleStatus {
        store
            .vehicles()
            .find_by_id(id)
            .await
            .expect("find")
            .expect("vehicle exists")
            .status
    }

    // ── Creation ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn create_persists_pending_booking_with_computed_price() {
        let (service, store, vehicle) = setup().await;

        // Five days against three included: two days of overage
        let booking = service
            .create(&Actor::customer(7), request(7, vehicle.id, "2024-06-01", "2024-06-05"))
            .await
            .expect("create");

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.total_price, 500_000 + 2 * 20_000);
        assert!(booking.id > 0);

        // A fresh pending hold does not touch the vehicle status
        assert_eq!(vehicle_status(&store, vehicle.id).await, VehicleStatus::Available);
    }

    #[tokio::test]
    async fn create_rejects_unknown_vehicle() {
        let (service, _store, _vehicle) = setup().await;
        let err = service
            .create(&Actor::customer(7), request(7, 999, "2024-06-01", "2024-06-05"))
            .await
            .expect_err("unknown vehicle");
        assert!(matches!(err, DomainError::NotFound { entity: "Vehicle", .. }));
    }

    #[tokio::test]
    async fn create_rejects_inverted_span() {
        let (service, _store, vehicle) = setup().await;
        let err = service
            .create(&Actor::customer(7), request(7, vehicle.id, "2024-06-05", "2024-06-01"))
            .await
            .expect_err("inverted span");
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_empty_purpose() {
        let (service, _store, vehicle) = setup().await;
        let mut req = request(7, vehicle.id, "2024-06-01", "2024-06-05");
        req.purpose = "   ".into();
        let err = service
            .create(&Actor::customer(7), req)
            .await
            .expect_err("empty purpose");
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn customer_cannot_book_for_someone_else() {
        let (service, _store, vehicle) = setup().await;
        let err = service
            .create(&Actor::customer(7), request(8, vehicle.id, "2024-06-01", "2024-06-05"))
            .await
            .expect_err("wrong customer");
        assert!(matches!(err, DomainError::NotEligible(_)));

        // Staff may create on a customer's behalf
        service
            .create(&Actor::staff(), request(8, vehicle.id, "2024-06-01", "2024-06-05"))
            .await
            .expect("staff create");
    }

    // ── Conflict detection ──────────────────────────────────────────────

    #[tokio::test]
    async fn overlapping_create_is_refused() {
        let (service, _store, vehicle) = setup().await;
        service
            .create(&Actor::customer(1), request(1, vehicle.id, "2024-06-01", "2024-06-03"))
            .await
            .expect("first create");

        // Shared boundary day: ends 03, next starts 03
        let err = service
            .create(&Actor::customer(2), request(2, vehicle.id, "2024-06-03", "2024-06-05"))
            .await
            .expect_err("boundary day conflicts");
        assert!(matches!(err, DomainError::SlotUnavailable(_)));
    }

    #[tokio::test]
    async fn disjoint_spans_share_a_vehicle() {
        let (service, _store, vehicle) = setup().await;
        service
            .create(&Actor::customer(1), request(1, vehicle.id, "2024-06-01", "2024-06-03"))
            .await
            .expect("first create");
        service
            .create(&Actor::customer(2), request(2, vehicle.id, "2024-06-04", "2024-06-06"))
            .await
            .expect("disjoint create");
    }

    #[tokio::test]
    async fn returned_booking_frees_the_dates() {
        let (service, _store, vehicle) = setup().await;
        let staff = Actor::staff();
        let booking = service
            .create(&Actor::customer(1), request(1, vehicle.id, "2024-06-01", "2024-06-03"))
            .await
            .expect("create");
        service.accept(&staff, booking.id).await.expect("accept");
        service.confirm(&staff, booking.id).await.expect("confirm");
        service.mark_returned(&staff, booking.id).await.expect("return");

        // Same dates are bookable again
        service
            .create(&Actor::customer(2), request(2, vehicle.id, "2024-06-01", "2024-06-03"))
            .await
            .expect("rebook after return");
    }

    #[tokio::test]
    async fn concurrent_creates_admit_exactly_one() {
        let (service, _store, vehicle) = setup().await;

        let mut handles = Vec::new();
        for customer in 1..=8 {
            let service = service.clone();
            let req = request(customer, vehicle.id, "2024-06-01", "2024-06-05");
            handles.push(tokio::spawn(async move {
                service.create(&Actor::customer(customer), req).await
            }));
        }

        let mut accepted = 0;
        let mut refused = 0;
        for handle in handles {
            match handle.await.expect("task join") {
                Ok(_) => accepted += 1,
                Err(DomainError::SlotUnavailable(_)) => refused += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(refused, 7);
    }

    // ── Lifecycle transitions ───────────────────────────────────────────

    #[tokio::test]
    async fn accept_moves_booking_and_vehicle() {
        let (service, store, vehicle) = setup().await;
        let booking = service
            .create(&Actor::customer(1), request(1, vehicle.id, "2024-06-01", "2024-06-03"))
            .await
            .expect("create");

        let accepted = service.accept(&Actor::staff(), booking.id).await.expect("accept");
        assert_eq!(accepted.status, BookingStatus::Accepted);
        assert_eq!(vehicle_status(&store, vehicle.id).await, VehicleStatus::Booked);
    }

    #[tokio::test]
    async fn full_lifecycle_reaches_returned_and_frees_vehicle() {
        let (service, store, vehicle) = setup().await;
        let staff = Actor::staff();
        let booking = service
            .create(&Actor::customer(1), request(1, vehicle.id, "2024-06-01", "2024-06-03"))
            .await
            .expect("create");

        service.accept(&staff, booking.id).await.expect("accept");
        assert_eq!(vehicle_status(&store, vehicle.id).await, VehicleStatus::Booked);

        service.confirm(&staff, booking.id).await.expect("confirm");
        assert_eq!(
            vehicle_status(&store, vehicle.id).await,
            VehicleStatus::NotAvailable
        );

        let returned = service.mark_returned(&staff, booking.id).await.expect("return");
        assert_eq!(returned.status, BookingStatus::Returned);
        assert_eq!(vehicle_status(&store, vehicle.id).await, VehicleStatus::Available);

        // An unconfirmed return record was created; staff sign it off
        let log = service.return_log(&staff, booking.id).await.expect("log");
        assert!(!log.confirmed_by_staff);

        let confirmed = service.confirm_return(&staff, booking.id).await.expect("confirm return");
        assert!(confirmed.confirmed_by_staff);
        assert!(confirmed.confirmed_at.is_some());

        // Second sign-off is refused
        let err = service
            .confirm_return(&staff, booking.id)
            .await
            .expect_err("double confirm");
        assert!(matches!(err, DomainError::NotEligible(_)));
    }

    #[tokio::test]
    async fn transitions_from_wrong_status_are_refused() {
        let (service, _store, vehicle) = setup().await;
        let staff = Actor::staff();
        let booking = service
            .create(&Actor::customer(1), request(1, vehicle.id, "2024-06-01", "2024-06-03"))
            .await
            .expect("create");

        // Pending booking: confirm and mark-returned both skip a step
        assert!(matches!(
            service.confirm(&staff, booking.id).await,
            Err(DomainError::NotEligible(_))
        ));
        assert!(matches!(
            service.mark_returned(&staff, booking.id).await,
            Err(DomainError::NotEligible(_))
        ));
        assert!(matches!(
            service.confirm_return(&staff, booking.id).await,
            Err(DomainError::NotEligible(_))
        ));

        // Double accept
        service.accept(&staff, booking.id).await.expect("accept");
        assert!(matches!(
            service.accept(&staff, booking.id).await,
            Err(DomainError::NotEligible(_))
        ));
    }

    #[tokio::test]
    async fn transitions_require_staff() {
        let (service, _store, vehicle) = setup().await;
        let booking = service
            .create(&Actor::customer(1), request(1, vehicle.id, "2024-06-01", "2024-06-03"))
            .await
            .expect("create");

        let err = service
            .accept(&Actor::customer(1), booking.id)
            .await
            .expect_err("customers cannot accept");
        assert!(matches!(err, DomainError::NotEligible(_)));
    }

    #[tokio::test]
    async fn accept_refuses_when_committed_overlap_exists() {
        let (service, store, vehicle) = setup().await;
        let staff = Actor::staff();

        // Two overlapping pendings seeded directly (the create path would
        // have refused the second one)
        let span = DateSpan::new(
            "2024-06-01".parse().expect("valid date"),
            "2024-06-03".parse().expect("valid date"),
        )
        .expect("valid span");
        let first = store
            .bookings()
            .save(Booking::new(1, vehicle.id, "trip", span, 500_000))
            .await
            .expect("seed first");
        let second = store
            .bookings()
            .save(Booking::new(2, vehicle.id, "trip", span, 500_000))
            .await
            .expect("seed second");

        service.accept(&staff, first.id).await.expect("first accept wins");
        let err = service
            .accept(&staff, second.id)
            .await
            .expect_err("second accept loses");
        assert!(matches!(err, DomainError::SlotUnavailable(_)));
    }

    #[tokio::test]
    async fn accept_refuses_while_another_booking_is_committed() {
        let (service, store, vehicle) = setup().await;
        let staff = Actor::staff();

        // Two pendings with disjoint dates; the first goes out on rent
        let june = service
            .create(&Actor::customer(1), request(1, vehicle.id, "2024-06-01", "2024-06-03"))
            .await
            .expect("create june");
        let july = service
            .create(&Actor::customer(2), request(2, vehicle.id, "2024-07-01", "2024-07-03"))
            .await
            .expect("create july");
        service.accept(&staff, june.id).await.expect("accept june");
        service.confirm(&staff, june.id).await.expect("confirm june");
        assert_eq!(
            vehicle_status(&store, vehicle.id).await,
            VehicleStatus::NotAvailable
        );

        // Accepting the second would give the vehicle two committed
        // bookings and flip its status while the car is out
        let err = service
            .accept(&staff, july.id)
            .await
            .expect_err("vehicle already committed");
        assert!(matches!(err, DomainError::SlotUnavailable(_)));
        assert_eq!(
            vehicle_status(&store, vehicle.id).await,
            VehicleStatus::NotAvailable
        );

        // Once the first is back the second can be accepted
        service.mark_returned(&staff, june.id).await.expect("return june");
        service.accept(&staff, july.id).await.expect("accept july");
        assert_eq!(vehicle_status(&store, vehicle.id).await, VehicleStatus::Booked);
    }

    // ── Cancellation and archival ───────────────────────────────────────

    #[tokio::test]
    async fn cancel_archives_and_removes_live_row() {
        let (service, _store, vehicle) = setup().await;
        let customer = Actor::customer(1);
        let booking = service
            .create(&customer, request(1, vehicle.id, "2024-06-01", "2024-06-03"))
            .await
            .expect("create");

        let archived = service.cancel(&customer, booking.id).await.expect("cancel");
        assert_eq!(archived.booking_id, booking.id);
        assert_eq!(archived.status, ArchivedStatus::Cancelled);

        // Live row is gone
        let err = service.get(&customer, booking.id).await.expect_err("gone");
        assert!(matches!(err, DomainError::NotFound { .. }));

        // Archive row is visible in the customer's history
        let history = service.history(&customer).await.expect("history");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].booking_id, booking.id);
    }

    #[tokio::test]
    async fn cancel_by_non_owner_is_refused() {
        let (service, _store, vehicle) = setup().await;
        let booking = service
            .create(&Actor::customer(1), request(1, vehicle.id, "2024-06-01", "2024-06-03"))
            .await
            .expect("create");

        let err = service
            .cancel(&Actor::customer(2), booking.id)
            .await
            .expect_err("not the owner");
        assert!(matches!(err, DomainError::NotEligible(_)));
    }

    #[tokio::test]
    async fn cancel_after_accept_is_refused() {
        let (service, _store, vehicle) = setup().await;
        let customer = Actor::customer(1);
        let booking = service
            .create(&customer, request(1, vehicle.id, "2024-06-01", "2024-06-03"))
            .await
            .expect("create");
        service.accept(&Actor::staff(), booking.id).await.expect("accept");

        let err = service
            .cancel(&customer, booking.id)
            .await
            .expect_err("already accepted");
        assert!(matches!(err, DomainError::NotEligible(_)));
    }

    #[tokio::test]
    async fn cancel_restore_is_guarded_by_committed_holds() {
        let (service, store, vehicle) = setup().await;
        let staff = Actor::staff();

        // An accepted booking holds the vehicle
        let holder = service
            .create(&Actor::customer(1), request(1, vehicle.id, "2024-06-01", "2024-06-03"))
            .await
            .expect("create holder");
        service.accept(&staff, holder.id).await.expect("accept");
        assert_eq!(vehicle_status(&store, vehicle.id).await, VehicleStatus::Booked);

        // A pending booking for later dates is cancelled: the vehicle's
        // status still belongs to the accepted one
        let pending = service
            .create(&Actor::customer(2), request(2, vehicle.id, "2024-07-01", "2024-07-03"))
            .await
            .expect("create pending");
        service.cancel(&Actor::customer(2), pending.id).await.expect("cancel");
        assert_eq!(vehicle_status(&store, vehicle.id).await, VehicleStatus::Booked);
    }

    // ── Queries ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn quote_does_not_persist() {
        let (service, _store, vehicle) = setup().await;
        let quote = service
            .quote(
                vehicle.id,
                "2024-06-01".parse().expect("valid date"),
                "2024-06-05".parse().expect("valid date"),
            )
            .await
            .expect("quote");
        assert_eq!(quote.total_price, 500_000 + 2 * 20_000);

        let all = service
            .list(&Actor::staff(), BookingFilter::default())
            .await
            .expect("list");
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn customers_see_only_their_own_bookings() {
        let (service, _store, vehicle) = setup().await;
        let first = service
            .create(&Actor::customer(1), request(1, vehicle.id, "2024-06-01", "2024-06-03"))
            .await
            .expect("create");
        let second = service
            .create(&Actor::customer(2), request(2, vehicle.id, "2024-06-04", "2024-06-06"))
            .await
            .expect("create");

        let own = service
            .list(&Actor::customer(1), BookingFilter::default())
            .await
            .expect("list");
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].id, first.id);

        let all = service
            .list(&Actor::staff(), BookingFilter::default())
            .await
            .expect("list");
        assert_eq!(all.len(), 2);

        // Direct fetch of a foreign booking looks like a missing one
        let err = service
            .get(&Actor::customer(1), second.id)
            .await
            .expect_err("foreign booking");
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    // ── Expiry sweep ────────────────────────────────────────────────────

    #[tokio::test]
    async fn expiry_archives_stale_pendings_only() {
        let (service, _store, vehicle) = setup().await;
        let staff = Actor::staff();

        let pending = service
            .create(&Actor::customer(1), request(1, vehicle.id, "2024-06-01", "2024-06-03"))
            .await
            .expect("create pending");
        let accepted = service
            .create(&Actor::customer(2), request(2, vehicle.id, "2024-06-04", "2024-06-06"))
            .await
            .expect("create accepted");
        service.accept(&staff, accepted.id).await.expect("accept");

        // Nothing is old enough for a one-hour TTL
        let swept = service
            .expire_stale_pending(chrono::Duration::hours(1))
            .await
            .expect("sweep");
        assert_eq!(swept, 0);

        // A zero TTL makes every pending stale; the accepted one survives
        let swept = service
            .expire_stale_pending(chrono::Duration::zero())
            .await
            .expect("sweep");
        assert_eq!(swept, 1);

        let history = service.history(&staff).await.expect("history");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].booking_id, pending.id);
        assert_eq!(history[0].status, ArchivedStatus::Expired);
    }
}
