//! SeaORM implementation of ReturnLogRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::domain::return_log::{ReturnLog, ReturnLogRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::return_log;

pub struct SeaOrmReturnLogRepository {
    db: DatabaseConnection,
}

impl SeaOrmReturnLogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: return_log::Model) -> ReturnLog {
    ReturnLog {
        id: m.id,
        booking_id: m.booking_id,
        returned_at: m.returned_at,
        confirmed_by_staff: m.confirmed_by_staff,
        confirmed_at: m.confirmed_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

#[async_trait]
impl ReturnLogRepository for SeaOrmReturnLogRepository {
    async fn find_by_booking(&self, booking_id: i32) -> DomainResult<Option<ReturnLog>> {
        let model = return_log::Entity::find()
            .filter(return_log::Column::BookingId.eq(booking_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn confirm(&self, booking_id: i32) -> DomainResult<bool> {
        debug!("Confirming return record for booking {}", booking_id);

        // Conditional on the record being still unconfirmed, so two racing
        // sign-offs resolve to one winner.
        let result = return_log::Entity::update_many()
            .col_expr(return_log::Column::ConfirmedByStaff, Expr::value(true))
            .col_expr(return_log::Column::ConfirmedAt, Expr::value(Some(Utc::now())))
            .filter(return_log::Column::BookingId.eq(booking_id))
            .filter(return_log::Column::ConfirmedByStaff.eq(false))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
