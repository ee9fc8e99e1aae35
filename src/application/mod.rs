pub mod services;

// Re-export key types for convenience
pub use services::{
    start_pending_expiry_task, Actor, BookingFilter, BookingService, NewBooking, NewVehicle,
    VehicleService, VehicleUpdate,
};
