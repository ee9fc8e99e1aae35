//! Database entities module

pub mod booking;
pub mod booking_history;
pub mod car;
pub mod return_log;

pub use booking::Entity as Booking;
pub use booking_history::Entity as BookingHistory;
pub use car::Entity as Car;
pub use return_log::Entity as ReturnLog;
