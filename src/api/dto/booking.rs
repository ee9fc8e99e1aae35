//! Booking API DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{ArchivedBooking, Booking, RentalQuote, ReturnLog};

/// Бронирование автомобиля
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingDto {
    /// Уникальный ID бронирования
    pub id: i32,
    /// ID клиента-владельца
    pub customer_id: i32,
    /// ID забронированного автомобиля
    pub car_id: i32,
    /// Цель аренды
    pub purpose: String,
    /// Первый день аренды (включительно)
    pub start_date: NaiveDate,
    /// Последний день аренды (включительно)
    pub end_date: NaiveDate,
    /// Статус: `pending`, `accepted`, `confirmed`, `returned`
    pub status: String,
    /// Итоговая стоимость (в мин. единицах валюты)
    pub total_price: i64,
    /// Дата создания
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            customer_id: b.customer_id,
            car_id: b.vehicle_id,
            purpose: b.purpose,
            start_date: b.span.start,
            end_date: b.span.end,
            status: b.status.to_string(),
            total_price: b.total_price,
            created_at: b.created_at,
        }
    }
}

/// Запрос на создание бронирования
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    /// ID автомобиля
    #[validate(range(min = 1))]
    pub car_id: i32,
    /// Клиент, от имени которого создаётся бронь.
    /// Обычные клиенты бронируют только для себя; сотрудники могут
    /// указать любого клиента.
    #[validate(range(min = 1))]
    pub customer_id: Option<i32>,
    /// Цель аренды
    #[validate(length(min = 1, max = 500))]
    pub purpose: String,
    /// Первый день аренды
    pub start_date: NaiveDate,
    /// Последний день аренды
    pub end_date: NaiveDate,
}

/// Запрос расчёта стоимости (без создания брони)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct QuoteRequest {
    /// ID автомобиля
    #[validate(range(min = 1))]
    pub car_id: i32,
    /// Первый день аренды
    pub start_date: NaiveDate,
    /// Последний день аренды
    pub end_date: NaiveDate,
}

/// Расшифровка стоимости аренды
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteDto {
    /// Всего дней аренды (включительно с обеих сторон)
    pub total_days: i64,
    /// Дней, покрытых базовой ценой
    pub included_days: i64,
    /// Дней сверх базового периода
    pub extra_days: i64,
    /// Базовая цена
    pub base_price: i64,
    /// Доплата за лишние дни
    pub overage_cost: i64,
    /// Итоговая стоимость
    pub total_price: i64,
    /// Валюта
    pub currency: String,
    /// Итог в человекочитаемом виде, напр. "350 000 UZS"
    pub formatted_total: String,
}

impl From<RentalQuote> for QuoteDto {
    fn from(q: RentalQuote) -> Self {
        let formatted_total = q.format_total();
        Self {
            total_days: q.total_days,
            included_days: q.included_days,
            extra_days: q.extra_days,
            base_price: q.base_price,
            overage_cost: q.overage_cost,
            total_price: q.total_price,
            currency: q.currency,
            formatted_total,
        }
    }
}

/// Архивная запись бронирования (отменённые и просроченные брони)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArchivedBookingDto {
    /// ID архивной записи
    pub id: i32,
    /// ID исходного бронирования
    pub booking_id: i32,
    /// ID клиента
    pub customer_id: i32,
    /// ID автомобиля
    pub car_id: i32,
    /// Цель аренды
    pub purpose: String,
    /// Первый день аренды
    pub start_date: NaiveDate,
    /// Последний день аренды
    pub end_date: NaiveDate,
    /// Стоимость на момент создания брони
    pub total_price: i64,
    /// Причина архивации: `cancelled` или `expired`
    pub status: String,
    /// Когда бронь была создана
    pub booked_at: DateTime<Utc>,
    /// Когда бронь попала в архив
    pub archived_at: DateTime<Utc>,
}

impl From<ArchivedBooking> for ArchivedBookingDto {
    fn from(a: ArchivedBooking) -> Self {
        Self {
            id: a.id,
            booking_id: a.booking_id,
            customer_id: a.customer_id,
            car_id: a.vehicle_id,
            purpose: a.purpose,
            start_date: a.start_date,
            end_date: a.end_date,
            total_price: a.total_price,
            status: a.status.as_str().to_string(),
            booked_at: a.booked_at,
            archived_at: a.archived_at,
        }
    }
}

/// Запись о возврате автомобиля
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReturnLogDto {
    /// ID записи
    pub id: i32,
    /// ID бронирования
    pub booking_id: i32,
    /// Когда автомобиль отмечен возвращённым
    pub returned_at: DateTime<Utc>,
    /// Подтверждён ли возврат сотрудником
    pub confirmed_by_staff: bool,
    /// Когда возврат был подтверждён
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl From<ReturnLog> for ReturnLogDto {
    fn from(r: ReturnLog) -> Self {
        Self {
            id: r.id,
            booking_id: r.booking_id,
            returned_at: r.returned_at,
            confirmed_by_staff: r.confirmed_by_staff,
            confirmed_at: r.confirmed_at,
        }
    }
}

/// Параметры списка бронирований
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct BookingListQuery {
    /// Фильтр по статусу: `pending`, `accepted`, `confirmed`, `returned`
    pub status: Option<String>,
    /// Фильтр по автомобилю
    pub car_id: Option<i32>,
}
