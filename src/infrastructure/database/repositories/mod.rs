//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod booking_history_repository;
pub mod booking_repository;
pub mod car_repository;
pub mod repository_provider;
pub mod return_log_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
