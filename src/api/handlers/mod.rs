//! API Handlers

pub mod bookings;
pub mod health;
pub mod metrics;
pub mod vehicles;

pub use bookings::*;
pub use health::*;
pub use metrics::*;
pub use vehicles::*;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::application::{BookingService, VehicleService};
use crate::domain::DomainError;

/// Shared state for the REST handlers
#[derive(Clone)]
pub struct AppState {
    pub vehicles: Arc<VehicleService>,
    pub bookings: Arc<BookingService>,
}

/// Error half of every handler's return type.
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// Maps a domain error onto the HTTP status taxonomy:
/// validation → 400, missing entity → 404, slot/eligibility conflicts → 409,
/// storage failures → 500.
pub(crate) fn error_response(err: DomainError) -> ApiError {
    let status = match &err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::SlotUnavailable(_) | DomainError::NotEligible(_) => StatusCode::CONFLICT,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::error(err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let (status, _) = error_response(DomainError::Validation("bad".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let (status, _) = error_response(DomainError::NotFound {
            entity: "Car",
            field: "id",
            value: "9".into(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflicts_map_to_409() {
        let (status, _) = error_response(DomainError::SlotUnavailable("taken".into()));
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = error_response(DomainError::NotEligible("not pending".into()));
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn storage_maps_to_500() {
        let (status, body) = error_response(DomainError::Storage("db gone".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.0.success);
    }
}
