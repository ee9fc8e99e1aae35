//! Booking history entity
//!
//! Archival snapshots of cancelled/expired bookings. Deliberately carries no
//! foreign keys: history must survive the deletion of the car it references.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Id the booking had while it was live
    pub booking_id: i32,
    pub customer_id: i32,
    pub car_id: i32,
    pub purpose: String,

    pub start_date: Date,
    pub end_date: Date,
    pub total_price: i64,

    /// Archive status: cancelled, expired
    pub status: String,

    /// When the original booking was created
    pub booked_at: DateTimeUtc,
    pub archived_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
