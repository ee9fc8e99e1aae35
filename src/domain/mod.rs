pub mod booking;
pub mod booking_archive;
pub mod error;
pub mod pricing;
pub mod repositories;
pub mod return_log;
pub mod span;
pub mod vehicle;

// Re-export commonly used types
pub use booking::{Booking, BookingAction, BookingStatus};
pub use booking_archive::{ArchivedBooking, ArchivedStatus};
pub use error::{DomainError, DomainResult};
pub use pricing::{PricingPolicy, RentalQuote};
pub use repositories::RepositoryProvider;
pub use return_log::ReturnLog;
pub use span::DateSpan;
pub use vehicle::{Vehicle, VehicleStatus};
