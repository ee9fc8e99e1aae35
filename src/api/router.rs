//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::*;
use crate::api::handlers::{bookings, health, metrics, vehicles, AppState};
use crate::api::middleware::http_metrics_middleware;
use crate::application::{BookingService, VehicleService};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Cars
        vehicles::list_vehicles,
        vehicles::get_vehicle,
        vehicles::create_vehicle,
        vehicles::update_vehicle,
        vehicles::delete_vehicle,
        // Bookings
        bookings::create_booking,
        bookings::quote_booking,
        bookings::list_bookings,
        bookings::booking_history,
        bookings::get_booking,
        bookings::accept_booking,
        bookings::confirm_booking,
        bookings::return_booking,
        bookings::confirm_return,
        bookings::cancel_booking,
        bookings::get_return_log,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<VehicleDto>,
            PaginationParams,
            EmptyData,
            // Cars
            VehicleDto,
            CreateVehicleRequest,
            UpdateVehicleRequest,
            // Bookings
            BookingDto,
            CreateBookingRequest,
            QuoteRequest,
            QuoteDto,
            ArchivedBookingDto,
            ReturnLogDto,
        )
    ),
    tags(
        (name = "Health", description = "Проверка состояния сервера. Используйте для health-check мониторинга (uptime, ping, readiness)."),
        (name = "Cars", description = "Управление автопарком. Поле `status` (`available`, `booked`, `not-available`) отражает жизненный цикл бронирований и не редактируется напрямую. Цены хранятся в наименьших единицах валюты (тийин/копейка)."),
        (name = "Bookings", description = "Жизненный цикл бронирований: `pending → accepted → confirmed → returned`, с альтернативной веткой `pending → cancelled` (бронь переносится в архив). Обе границы периода аренды включительны; общий граничный день двух броней считается конфликтом."),
    ),
    info(
        title = "Texnouz Rental Service API",
        version = "1.0.0",
        description = "REST API сервиса аренды автомобилей: автопарк, бронирования, возвраты.

## Идентификация

Сервис доверяет вышестоящему шлюзу и читает личность вызывающего из заголовков:
- `x-actor-id` — числовой ID клиента
- `x-actor-role: staff` — помечает сотрудника

Без заголовков запрос выполняется анонимно; операции, требующие владельца
или сотрудника, будут отклонены.

## Формат ответов

Все REST-ответы обёрнуты в стандартную оболочку:
```json
{\"success\": true, \"data\": {...}, \"error\": null}
```

При ошибке:
```json
{\"success\": false, \"data\": null, \"error\": \"описание ошибки\"}
```

## Пагинация

Эндпоинты со списками поддерживают параметры `page` (от 1) и `limit` (по умолчанию 50).",
        license(
            name = "MIT"
        ),
        contact(
            name = "Texnouz",
            email = "support@texnouz.com"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    vehicles_service: Arc<VehicleService>,
    booking_service: Arc<BookingService>,
    prometheus: PrometheusHandle,
) -> Router {
    let state = AppState {
        vehicles: vehicles_service,
        bookings: booking_service,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let car_routes = Router::new()
        .route("/", get(vehicles::list_vehicles).post(vehicles::create_vehicle))
        .route(
            "/{id}",
            get(vehicles::get_vehicle)
                .put(vehicles::update_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .with_state(state.clone());

    // Static segments (/quote, /history) must live in the same router as
    // /{id} so matchit resolves them ahead of the parametric route.
    let booking_routes = Router::new()
        .route("/", get(bookings::list_bookings).post(bookings::create_booking))
        .route("/quote", post(bookings::quote_booking))
        .route("/history", get(bookings::booking_history))
        .route("/{id}", get(bookings::get_booking))
        .route("/{id}/accept", post(bookings::accept_booking))
        .route("/{id}/confirm", post(bookings::confirm_booking))
        .route("/{id}/return", post(bookings::return_booking))
        .route("/{id}/confirm-return", post(bookings::confirm_return))
        .route("/{id}/cancel", post(bookings::cancel_booking))
        .route("/{id}/return-log", get(bookings::get_return_log))
        .with_state(state);

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState { handle: prometheus });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check))
        // Prometheus scrape endpoint
        .merge(metrics_routes)
        // Cars
        .nest("/api/v1/cars", car_routes)
        // Bookings
        .nest("/api/v1/bookings", booking_routes)
        // Middleware
        .layer(axum_middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
