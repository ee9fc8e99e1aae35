//! Vehicle (car) API DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Vehicle;

/// Автомобиль автопарка
///
/// Поле `status` является проекцией жизненного цикла бронирований
/// (`available` / `booked` / `not-available`) и не редактируется напрямую.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehicleDto {
    /// Уникальный ID автомобиля
    pub id: i32,
    /// Название (напр. "Chevrolet Cobalt")
    pub name: String,
    /// Категория: `sedan`, `suv`, `minivan` и т.д.
    pub category: String,
    /// Цвет
    pub color: String,
    /// Статус доступности: `available`, `booked`, `not-available`
    pub status: String,
    /// Цена базового периода аренды (в мин. единицах валюты)
    pub base_price: i64,
    /// Сколько дней покрывает базовая цена
    pub base_duration_days: i64,
    /// Описание
    pub description: Option<String>,
    /// Дата создания
    pub created_at: DateTime<Utc>,
    /// Дата последнего обновления
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            name: v.name,
            category: v.category,
            color: v.color,
            status: v.status.to_string(),
            base_price: v.base_price,
            base_duration_days: v.base_duration_days,
            description: v.description,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

/// Запрос на регистрацию автомобиля
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicleRequest {
    /// Название автомобиля
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Категория
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    /// Цвет
    #[validate(length(min = 1, max = 30))]
    pub color: String,
    /// Цена базового периода (в мин. единицах валюты, >= 0)
    #[validate(range(min = 0))]
    pub base_price: i64,
    /// Дней в базовом периоде (>= 1)
    #[validate(range(min = 1))]
    pub base_duration_days: i64,
    /// Описание
    pub description: Option<String>,
}

/// Запрос на обновление автомобиля (partial update)
///
/// Передайте только изменяемые поля. Статус доступности изменить нельзя —
/// им управляет жизненный цикл бронирований.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVehicleRequest {
    /// Новое название
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// Новая категория
    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,
    /// Новый цвет
    #[validate(length(min = 1, max = 30))]
    pub color: Option<String>,
    /// Новая цена базового периода
    #[validate(range(min = 0))]
    pub base_price: Option<i64>,
    /// Новая длительность базового периода
    #[validate(range(min = 1))]
    pub base_duration_days: Option<i64>,
    /// Новое описание
    pub description: Option<String>,
}

/// Параметры списка автомобилей
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct VehicleListQuery {
    /// Фильтр по статусу: `available`, `booked`, `not-available`
    pub status: Option<String>,
    /// Номер страницы (начиная с 1). По умолчанию: 1
    #[serde(default = "super::common::default_page")]
    pub page: u32,
    /// Количество элементов на странице. По умолчанию: 50
    #[serde(default = "super::common::default_limit")]
    pub limit: u32,
}
