//! Booking aggregate
//!
//! Contains the Booking entity, the status state machine with its paired
//! vehicle-status projection, and the repository interface.

pub mod model;
pub mod repository;

pub use model::{Booking, BookingAction, BookingStatus};
pub use repository::BookingRepository;
