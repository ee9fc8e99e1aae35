//! Booking lifecycle REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::dto::{
    ApiResponse, ArchivedBookingDto, BookingDto, BookingListQuery, CreateBookingRequest, QuoteDto,
    QuoteRequest, ReturnLogDto,
};
use crate::api::handlers::{error_response, ApiError, AppState};
use crate::api::validated_json::ValidatedJson;
use crate::application::{Actor, BookingFilter, NewBooking};
use crate::domain::{BookingStatus, DomainError};

/// Создание бронирования
///
/// Бронь создаётся в статусе `pending` и ждёт решения сотрудника.
/// Запрошенный период проверяется на пересечение со всеми активными
/// бронями автомобиля; общий граничный день считается конфликтом.
/// Стоимость фиксируется в момент создания.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Бронь создана (pending)", body = ApiResponse<BookingDto>),
        (status = 400, description = "Некорректный период аренды"),
        (status = 404, description = "Автомобиль не найден"),
        (status = 409, description = "Период пересекается с активной бронью"),
        (status = 422, description = "Некорректные данные")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(req): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), ApiError> {
    let customer_id = req
        .customer_id
        .or(actor.customer_id)
        .ok_or_else(|| {
            error_response(DomainError::NotEligible(
                "a booking requires a customer identity".into(),
            ))
        })?;

    let new = NewBooking {
        customer_id,
        vehicle_id: req.car_id,
        purpose: req.purpose,
        start_date: req.start_date,
        end_date: req.end_date,
    };
    let saved = state
        .bookings
        .create(&actor, new)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

/// Предварительный расчёт стоимости
///
/// Считает стоимость аренды автомобиля на указанный период, ничего не
/// сохраняя. Доступность периода не проверяется.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/quote",
    tag = "Bookings",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Расшифровка стоимости", body = ApiResponse<QuoteDto>),
        (status = 400, description = "Некорректный период"),
        (status = 404, description = "Автомобиль не найден")
    )
)]
pub async fn quote_booking(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<QuoteRequest>,
) -> Result<Json<ApiResponse<QuoteDto>>, ApiError> {
    let quote = state
        .bookings
        .quote(req.car_id, req.start_date, req.end_date)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(quote.into())))
}

/// Список бронирований
///
/// Сотрудники видят все брони, клиенты — только свои.
/// Поддерживает фильтры по статусу и автомобилю.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Список бронирований", body = ApiResponse<Vec<BookingDto>>),
        (status = 400, description = "Неизвестный статус в фильтре")
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    actor: Actor,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, ApiError> {
    let status = match query.status.as_deref() {
        None => None,
        Some(s) => Some(BookingStatus::parse(s).ok_or_else(|| {
            error_response(DomainError::Validation(format!(
                "unknown booking status '{}'",
                s
            )))
        })?),
    };
    let filter = BookingFilter {
        status,
        vehicle_id: query.car_id,
    };
    let bookings = state
        .bookings
        .list(&actor, filter)
        .await
        .map_err(error_response)?;
    let dtos: Vec<BookingDto> = bookings.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// Архив бронирований
///
/// Отменённые и просроченные брони. Сотрудники видят весь архив,
/// клиенты — только свои записи.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/history",
    tag = "Bookings",
    responses(
        (status = 200, description = "Архивные записи", body = ApiResponse<Vec<ArchivedBookingDto>>)
    )
)]
pub async fn booking_history(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Json<ApiResponse<Vec<ArchivedBookingDto>>>, ApiError> {
    let archived = state
        .bookings
        .history(&actor)
        .await
        .map_err(error_response)?;
    let dtos: Vec<ArchivedBookingDto> = archived.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// Получение бронирования по ID
///
/// Клиент видит только свои брони; сотрудник — любые.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(
        ("id" = i32, Path, description = "ID бронирования")
    ),
    responses(
        (status = 200, description = "Бронирование", body = ApiResponse<BookingDto>),
        (status = 404, description = "Бронь не найдена или принадлежит другому клиенту")
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    actor: Actor,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let booking = state
        .bookings
        .get(&actor, id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

/// Принятие брони сотрудником
///
/// `pending → accepted`; автомобиль переходит в статус `booked`.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/accept",
    tag = "Bookings",
    params(
        ("id" = i32, Path, description = "ID бронирования")
    ),
    responses(
        (status = 200, description = "Бронь принята", body = ApiResponse<BookingDto>),
        (status = 404, description = "Бронь не найдена"),
        (status = 409, description = "Бронь не в статусе pending или нет прав")
    )
)]
pub async fn accept_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    actor: Actor,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let booking = state
        .bookings
        .accept(&actor, id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

/// Подтверждение выдачи автомобиля
///
/// `accepted → confirmed`; автомобиль переходит в статус `not-available`.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/confirm",
    tag = "Bookings",
    params(
        ("id" = i32, Path, description = "ID бронирования")
    ),
    responses(
        (status = 200, description = "Выдача подтверждена", body = ApiResponse<BookingDto>),
        (status = 404, description = "Бронь не найдена"),
        (status = 409, description = "Бронь не в статусе accepted или нет прав")
    )
)]
pub async fn confirm_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    actor: Actor,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let booking = state
        .bookings
        .confirm(&actor, id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

/// Отметка возврата автомобиля
///
/// `confirmed → returned`; автомобиль снова `available`, создаётся
/// запись о возврате.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/return",
    tag = "Bookings",
    params(
        ("id" = i32, Path, description = "ID бронирования")
    ),
    responses(
        (status = 200, description = "Возврат зафиксирован", body = ApiResponse<BookingDto>),
        (status = 404, description = "Бронь не найдена"),
        (status = 409, description = "Бронь не в статусе confirmed или нет прав")
    )
)]
pub async fn return_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    actor: Actor,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let booking = state
        .bookings
        .mark_returned(&actor, id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(booking.into())))
}

/// Подтверждение записи о возврате
///
/// Сотрудник подтверждает запись о возврате после осмотра автомобиля.
/// Повторное подтверждение отклоняется.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/confirm-return",
    tag = "Bookings",
    params(
        ("id" = i32, Path, description = "ID бронирования")
    ),
    responses(
        (status = 200, description = "Возврат подтверждён", body = ApiResponse<ReturnLogDto>),
        (status = 404, description = "Запись о возврате не найдена"),
        (status = 409, description = "Возврат уже подтверждён или нет прав")
    )
)]
pub async fn confirm_return(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    actor: Actor,
) -> Result<Json<ApiResponse<ReturnLogDto>>, ApiError> {
    let log = state
        .bookings
        .confirm_return(&actor, id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(log.into())))
}

/// Отмена брони клиентом
///
/// Доступна только владельцу и только для статуса `pending`. Бронь
/// переносится в архив со статусом `cancelled` и исчезает из активных.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/cancel",
    tag = "Bookings",
    params(
        ("id" = i32, Path, description = "ID бронирования")
    ),
    responses(
        (status = 200, description = "Бронь отменена и архивирована", body = ApiResponse<ArchivedBookingDto>),
        (status = 404, description = "Бронь не найдена"),
        (status = 409, description = "Бронь уже принята или принадлежит другому клиенту")
    )
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    actor: Actor,
) -> Result<Json<ApiResponse<ArchivedBookingDto>>, ApiError> {
    let archived = state
        .bookings
        .cancel(&actor, id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(archived.into())))
}

/// Запись о возврате по бронированию
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}/return-log",
    tag = "Bookings",
    params(
        ("id" = i32, Path, description = "ID бронирования")
    ),
    responses(
        (status = 200, description = "Запись о возврате", body = ApiResponse<ReturnLogDto>),
        (status = 404, description = "Запись не найдена")
    )
)]
pub async fn get_return_log(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    actor: Actor,
) -> Result<Json<ApiResponse<ReturnLogDto>>, ApiError> {
    let log = state
        .bookings
        .return_log(&actor, id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(log.into())))
}
