//! REST API module for the rental service
//!
//! Provides HTTP endpoints for fleet management, the booking lifecycle,
//! quotes and return records, plus Swagger UI and a Prometheus endpoint.

pub mod dto;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod router;
pub mod validated_json;

pub use router::create_api_router;
pub use validated_json::ValidatedJson;
