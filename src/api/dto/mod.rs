//! API DTOs

pub mod booking;
pub mod common;
pub mod vehicle;

pub use booking::*;
pub use common::*;
pub use vehicle::*;
