//! SeaORM implementation of BookingArchiveRepository
//!
//! Read-only: archive rows are inserted by the booking repository's
//! cancel/expire composite so they commit with the live-row removal.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::booking_archive::{ArchivedBooking, ArchivedStatus, BookingArchiveRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::booking_history;

pub struct SeaOrmBookingHistoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingHistoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: booking_history::Model) -> DomainResult<ArchivedBooking> {
    let status = ArchivedStatus::parse(&m.status).ok_or_else(|| {
        DomainError::Storage(format!(
            "archived booking {} has unknown status '{}'",
            m.id, m.status
        ))
    })?;
    Ok(ArchivedBooking {
        id: m.id,
        booking_id: m.booking_id,
        customer_id: m.customer_id,
        vehicle_id: m.car_id,
        purpose: m.purpose,
        start_date: m.start_date,
        end_date: m.end_date,
        total_price: m.total_price,
        status,
        booked_at: m.booked_at,
        archived_at: m.archived_at,
    })
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

#[async_trait]
impl BookingArchiveRepository for SeaOrmBookingHistoryRepository {
    async fn find_all(&self) -> DomainResult<Vec<ArchivedBooking>> {
        let models = booking_history::Entity::find()
            .order_by_desc(booking_history::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_by_customer(&self, customer_id: i32) -> DomainResult<Vec<ArchivedBooking>> {
        let models = booking_history::Entity::find()
            .filter(booking_history::Column::CustomerId.eq(customer_id))
            .order_by_desc(booking_history::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }
}
