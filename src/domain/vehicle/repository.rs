//! Vehicle repository interface

use async_trait::async_trait;

use super::model::{Vehicle, VehicleStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Insert a new vehicle; returns it with the assigned id
    async fn save(&self, vehicle: Vehicle) -> DomainResult<Vehicle>;

    /// Find vehicle by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>>;

    /// Find all vehicles
    async fn find_all(&self) -> DomainResult<Vec<Vehicle>>;

    /// Find vehicles in a given availability status
    async fn find_by_status(&self, status: VehicleStatus) -> DomainResult<Vec<Vehicle>>;

    /// Update a vehicle's descriptive fields. The status column is owned by
    /// the booking state machine and is NOT written by this method.
    async fn update(&self, vehicle: Vehicle) -> DomainResult<()>;

    /// Delete a vehicle. Callers must first check no booking references it.
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
