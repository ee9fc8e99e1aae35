//! Fleet (car) REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::dto::{
    ApiResponse, CreateVehicleRequest, EmptyData, PaginatedResponse, UpdateVehicleRequest,
    VehicleDto, VehicleListQuery,
};
use crate::api::handlers::{error_response, ApiError, AppState};
use crate::api::validated_json::ValidatedJson;
use crate::application::{Actor, NewVehicle, VehicleUpdate};
use crate::domain::{DomainError, VehicleStatus};

fn parse_status_filter(raw: Option<&str>) -> Result<Option<VehicleStatus>, ApiError> {
    match raw {
        None => Ok(None),
        Some(s) => match VehicleStatus::parse(s) {
            Some(status) => Ok(Some(status)),
            None => Err(error_response(DomainError::Validation(format!(
                "unknown vehicle status '{}'",
                s
            )))),
        },
    }
}

/// Список автомобилей автопарка
///
/// Возвращает страницу автомобилей, опционально отфильтрованную по статусу
/// доступности. Доступен без авторизации — это витрина автопарка.
#[utoipa::path(
    get,
    path = "/api/v1/cars",
    tag = "Cars",
    params(VehicleListQuery),
    responses(
        (status = 200, description = "Страница автомобилей", body = ApiResponse<PaginatedResponse<VehicleDto>>),
        (status = 400, description = "Неизвестный статус в фильтре")
    )
)]
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleListQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<VehicleDto>>>, ApiError> {
    let status = parse_status_filter(query.status.as_deref())?;
    let vehicles = state.vehicles.list(status).await.map_err(error_response)?;

    let total = vehicles.len() as u64;
    let page = query.page.max(1);
    let limit = query.limit.clamp(1, 100);
    let offset = ((page - 1) * limit) as usize;
    let items: Vec<VehicleDto> = vehicles
        .into_iter()
        .skip(offset)
        .take(limit as usize)
        .map(Into::into)
        .collect();

    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items, total, page, limit,
    ))))
}

/// Получение автомобиля по ID
#[utoipa::path(
    get,
    path = "/api/v1/cars/{id}",
    tag = "Cars",
    params(
        ("id" = i32, Path, description = "ID автомобиля")
    ),
    responses(
        (status = 200, description = "Полная информация об автомобиле", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Автомобиль не найден")
    )
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<VehicleDto>>, ApiError> {
    let vehicle = state.vehicles.get(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(vehicle.into())))
}

/// Регистрация нового автомобиля
///
/// Только для сотрудников. Новый автомобиль создаётся в статусе `available`.
#[utoipa::path(
    post,
    path = "/api/v1/cars",
    tag = "Cars",
    request_body = CreateVehicleRequest,
    responses(
        (status = 201, description = "Автомобиль зарегистрирован", body = ApiResponse<VehicleDto>),
        (status = 409, description = "Операция доступна только сотрудникам"),
        (status = 422, description = "Некорректные данные")
    )
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(req): ValidatedJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleDto>>), ApiError> {
    let new = NewVehicle {
        name: req.name,
        category: req.category,
        color: req.color,
        base_price: req.base_price,
        base_duration_days: req.base_duration_days,
        description: req.description,
    };
    let saved = state
        .vehicles
        .register(&actor, new)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

/// Обновление автомобиля
///
/// Partial update описательных полей. Статус доступности изменить нельзя —
/// им управляет жизненный цикл бронирований. Только для сотрудников.
#[utoipa::path(
    put,
    path = "/api/v1/cars/{id}",
    tag = "Cars",
    params(
        ("id" = i32, Path, description = "ID автомобиля")
    ),
    request_body = UpdateVehicleRequest,
    responses(
        (status = 200, description = "Автомобиль обновлён", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Автомобиль не найден"),
        (status = 409, description = "Операция доступна только сотрудникам")
    )
)]
pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    actor: Actor,
    ValidatedJson(req): ValidatedJson<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleDto>>, ApiError> {
    let update = VehicleUpdate {
        name: req.name,
        category: req.category,
        color: req.color,
        base_price: req.base_price,
        base_duration_days: req.base_duration_days,
        description: req.description,
    };
    let saved = state
        .vehicles
        .update(&actor, id, update)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(saved.into())))
}

/// Удаление автомобиля
///
/// Отклоняется, пока на автомобиль есть активные бронирования.
/// Только для сотрудников.
#[utoipa::path(
    delete,
    path = "/api/v1/cars/{id}",
    tag = "Cars",
    params(
        ("id" = i32, Path, description = "ID автомобиля")
    ),
    responses(
        (status = 200, description = "Автомобиль удалён", body = ApiResponse<EmptyData>),
        (status = 404, description = "Автомобиль не найден"),
        (status = 409, description = "Есть активные бронирования или нет прав")
    )
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    actor: Actor,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    state
        .vehicles
        .delete(&actor, id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
