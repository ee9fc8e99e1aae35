//! Booking archive aggregate: terminal records of cancelled or expired holds

pub mod model;
pub mod repository;

pub use model::{ArchivedBooking, ArchivedStatus};
pub use repository::BookingArchiveRepository;
