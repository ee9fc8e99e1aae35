//! Return log aggregate: vehicle hand-back records awaiting staff sign-off

pub mod model;
pub mod repository;

pub use model::ReturnLog;
pub use repository::ReturnLogRepository;
