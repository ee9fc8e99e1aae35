//! Vehicle management service

use std::sync::Arc;

use tracing::info;

use super::Actor;
use crate::domain::{DomainError, DomainResult, RepositoryProvider, Vehicle, VehicleStatus};

/// Fields accepted when registering a vehicle
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub name: String,
    pub category: String,
    pub color: String,
    pub base_price: i64,
    pub base_duration_days: i64,
    pub description: Option<String>,
}

/// Partial update of a vehicle's descriptive fields.
///
/// `status` is deliberately absent: the availability column is owned by the
/// booking state machine and cannot be edited here.
#[derive(Debug, Clone, Default)]
pub struct VehicleUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub base_price: Option<i64>,
    pub base_duration_days: Option<i64>,
    pub description: Option<String>,
}

/// Service for fleet management operations
pub struct VehicleService {
    repos: Arc<dyn RepositoryProvider>,
}

impl VehicleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Register a new vehicle. Staff only; always starts `available`.
    pub async fn register(&self, actor: &Actor, new: NewVehicle) -> DomainResult<Vehicle> {
        actor.require_staff("vehicle registration")?;
        validate_fields(&new.name, &new.category, new.base_price, new.base_duration_days)?;

        let now = chrono::Utc::now();
        let vehicle = Vehicle {
            id: 0, // assigned by storage
            name: new.name.trim().to_string(),
            category: new.category.trim().to_string(),
            color: new.color.trim().to_string(),
            status: VehicleStatus::Available,
            base_price: new.base_price,
            base_duration_days: new.base_duration_days,
            description: new.description,
            created_at: now,
            updated_at: now,
        };

        let saved = self.repos.vehicles().save(vehicle).await?;
        info!(
            vehicle_id = saved.id,
            name = %saved.name,
            category = %saved.category,
            "Vehicle registered"
        );
        Ok(saved)
    }

    pub async fn get(&self, id: i32) -> DomainResult<Vehicle> {
        self.repos
            .vehicles()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: id.to_string(),
            })
    }

    /// List the fleet, optionally restricted to one availability status.
    /// `status=available` is the customer-facing landing query.
    pub async fn list(&self, status: Option<VehicleStatus>) -> DomainResult<Vec<Vehicle>> {
        match status {
            Some(status) => self.repos.vehicles().find_by_status(status).await,
            None => self.repos.vehicles().find_all().await,
        }
    }

    /// Update descriptive fields. Staff only; never touches `status`.
    pub async fn update(&self, actor: &Actor, id: i32, update: VehicleUpdate) -> DomainResult<Vehicle> {
        actor.require_staff("vehicle update")?;

        let mut vehicle = self.get(id).await?;
        if let Some(name) = update.name {
            vehicle.name = name;
        }
        if let Some(category) = update.category {
            vehicle.category = category;
        }
        if let Some(color) = update.color {
            vehicle.color = color;
        }
        if let Some(base_price) = update.base_price {
            vehicle.base_price = base_price;
        }
        if let Some(base_duration_days) = update.base_duration_days {
            vehicle.base_duration_days = base_duration_days;
        }
        if let Some(description) = update.description {
            vehicle.description = Some(description);
        }
        validate_fields(
            &vehicle.name,
            &vehicle.category,
            vehicle.base_price,
            vehicle.base_duration_days,
        )?;

        self.repos.vehicles().update(vehicle).await?;
        let updated = self.get(id).await?;
        info!(vehicle_id = id, "Vehicle updated");
        Ok(updated)
    }

    /// Delete a vehicle. Staff only; refused while any booking references it
    /// (live rows carry the conflict history the fleet still needs).
    pub async fn delete(&self, actor: &Actor, id: i32) -> DomainResult<()> {
        actor.require_staff("vehicle deletion")?;

        // 404 before 409 for a vehicle that never existed
        self.get(id).await?;

        if self.repos.bookings().exists_for_vehicle(id).await? {
            return Err(DomainError::NotEligible(format!(
                "vehicle {} still has bookings and cannot be deleted",
                id
            )));
        }

        self.repos.vehicles().delete(id).await?;
        info!(vehicle_id = id, "Vehicle deleted");
        Ok(())
    }
}

fn validate_fields(
    name: &str,
    category: &str,
    base_price: i64,
    base_duration_days: i64,
) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::Validation("name must not be empty".into()));
    }
    if category.trim().is_empty() {
        return Err(DomainError::Validation("category must not be empty".into()));
    }
    if base_price < 0 {
        return Err(DomainError::Validation(
            "base_price must not be negative".into(),
        ));
    }
    if base_duration_days < 1 {
        return Err(DomainError::Validation(
            "base_duration_days must be at least 1".into(),
        ));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::Booking;
    use crate::domain::span::DateSpan;
    use crate::infrastructure::storage::InMemoryStore;

    fn service() -> (VehicleService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        (VehicleService::new(store.clone()), store)
    }

    fn new_vehicle() -> NewVehicle {
        NewVehicle {
            name: "Chevrolet Cobalt".into(),
            category: "sedan".into(),
            color: "white".into(),
            base_price: 500_000,
            base_duration_days: 3,
            description: None,
        }
    }

    #[tokio::test]
    async fn register_requires_staff() {
        let (service, _) = service();
        let err = service
            .register(&Actor::customer(1), new_vehicle())
            .await
            .expect_err("customers cannot register vehicles");
        assert!(matches!(err, DomainError::NotEligible(_)));
    }

    #[tokio::test]
    async fn register_starts_available() {
        let (service, _) = service();
        let vehicle = service
            .register(&Actor::staff(), new_vehicle())
            .await
            .expect("register");
        assert_eq!(vehicle.status, VehicleStatus::Available);
        assert!(vehicle.id > 0);
    }

    #[tokio::test]
    async fn register_rejects_bad_fields() {
        let (service, _) = service();

        let mut v = new_vehicle();
        v.name = "  ".into();
        assert!(matches!(
            service.register(&Actor::staff(), v).await,
            Err(DomainError::Validation(_))
        ));

        let mut v = new_vehicle();
        v.base_duration_days = 0;
        assert!(matches!(
            service.register(&Actor::staff(), v).await,
            Err(DomainError::Validation(_))
        ));

        let mut v = new_vehicle();
        v.base_price = -1;
        assert!(matches!(
            service.register(&Actor::staff(), v).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn update_changes_fields_but_not_status() {
        let (service, _store) = service();
        let vehicle = service
            .register(&Actor::staff(), new_vehicle())
            .await
            .expect("register");

        let updated = service
            .update(
                &Actor::staff(),
                vehicle.id,
                VehicleUpdate {
                    color: Some("black".into()),
                    ..Default::default()
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.color, "black");
        assert_eq!(updated.name, "Chevrolet Cobalt");
        assert_eq!(updated.status, VehicleStatus::Available);
    }

    #[tokio::test]
    async fn delete_refused_while_bookings_exist() {
        let (service, store) = service();
        let vehicle = service
            .register(&Actor::staff(), new_vehicle())
            .await
            .expect("register");

        let span = DateSpan::new(
            "2024-06-01".parse().expect("valid date"),
            "2024-06-03".parse().expect("valid date"),
        )
        .expect("valid span");
        store
            .bookings()
            .save(Booking::new(1, vehicle.id, "trip", span, 500_000))
            .await
            .expect("save booking");

        let err = service
            .delete(&Actor::staff(), vehicle.id)
            .await
            .expect_err("delete must be refused");
        assert!(matches!(err, DomainError::NotEligible(_)));

        // Still listed
        assert_eq!(service.list(None).await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn delete_unknown_vehicle_is_not_found() {
        let (service, _) = service();
        let err = service
            .delete(&Actor::staff(), 99)
            .await
            .expect_err("missing vehicle");
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        use crate::domain::BookingStatus;

        let (service, store) = service();
        let a = service
            .register(&Actor::staff(), new_vehicle())
            .await
            .expect("register");
        let mut second = new_vehicle();
        second.name = "Malibu".into();
        let b = service
            .register(&Actor::staff(), second)
            .await
            .expect("register");

        let span = DateSpan::new(
            "2024-06-01".parse().expect("valid date"),
            "2024-06-03".parse().expect("valid date"),
        )
        .expect("valid span");
        let booking = store
            .bookings()
            .save(Booking::new(1, b.id, "trip", span, 500_000))
            .await
            .expect("save booking");
        store
            .bookings()
            .advance_with_vehicle(
                booking.id,
                BookingStatus::Pending,
                BookingStatus::Accepted,
                b.id,
                VehicleStatus::Booked,
            )
            .await
            .expect("accept");

        let available = service
            .list(Some(VehicleStatus::Available))
            .await
            .expect("list");
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, a.id);
    }
}
