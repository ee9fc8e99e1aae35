//! Vehicle aggregate
//!
//! Contains the Vehicle entity, its status projection, and repository
//! interface.

pub mod model;
pub mod repository;

pub use model::{Vehicle, VehicleStatus};
pub use repository::VehicleRepository;
