//! # Texnouz Rental Service
//!
//! Vehicle rental backend: fleet management, booking lifecycle, returns.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Booking lifecycle and fleet services, background tasks
//! - **infrastructure**: SeaORM persistence and in-memory storage
//! - **api**: REST API with Swagger documentation
//! - **support**: Graceful shutdown plumbing

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod server;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryStore};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;

// Re-export API router
pub use api::create_api_router;

// Re-export server runtime
pub use server::{ServerHandle, ServerOptions};
