//! SeaORM implementation of BookingRepository
//!
//! The lifecycle composites each open a transaction and gate every write on
//! a conditional `UPDATE ... WHERE status = expected` (or the matching
//! conditional DELETE). Zero rows affected means another caller won the
//! transition; the transaction is dropped without committing and the caller
//! is told nothing was written.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::booking::{Booking, BookingRepository, BookingStatus};
use crate::domain::booking_archive::{ArchivedBooking, ArchivedStatus};
use crate::domain::span::DateSpan;
use crate::domain::vehicle::VehicleStatus;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking, booking_history, car, return_log};

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

// A status string the closed enum does not know is a corrupt row, not a
// booking to revive; it surfaces as a Storage error.
fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    let status = BookingStatus::parse(&m.status).ok_or_else(|| {
        DomainError::Storage(format!(
            "booking {} has unknown status '{}'",
            m.id, m.status
        ))
    })?;
    Ok(Booking {
        id: m.id,
        customer_id: m.customer_id,
        vehicle_id: m.car_id,
        purpose: m.purpose,
        span: DateSpan {
            start: m.start_date,
            end: m.end_date,
        },
        status,
        total_price: m.total_price,
        created_at: m.created_at,
    })
}

fn history_to_domain(m: booking_history::Model) -> DomainResult<ArchivedBooking> {
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

/// Conditional status move for one booking row. Returns how many rows
/// matched (0 or 1).
async fn conditional_status_update(
    txn: &DatabaseTransaction,
    booking_id: i32,
    expected: BookingStatus,
    next: BookingStatus,
) -> DomainResult<u64> {
    let result = booking::Entity::update_many()
        .col_expr(booking::Column::Status, Expr::value(next.as_str()))
        .filter(booking::Column::Id.eq(booking_id))
        .filter(booking::Column::Status.eq(expected.as_str()))
        .exec(txn)
        .await
        .map_err(db_err)?;
    Ok(result.rows_affected)
}

async fn set_car_status(
    txn: &DatabaseTransaction,
    car_id: i32,
    status: VehicleStatus,
) -> DomainResult<()> {
    car::Entity::update_many()
        .col_expr(car::Column::Status, Expr::value(status.as_str()))
        .col_expr(car::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(car::Column::Id.eq(car_id))
        .exec(txn)
        .await
        .map_err(db_err)?;
    Ok(())
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn save(&self, b: Booking) -> DomainResult<Booking> {
        debug!("Saving booking for car {}", b.vehicle_id);

        let model = booking::ActiveModel {
            id: NotSet,
            customer_id: Set(b.customer_id),
            car_id: Set(b.vehicle_id),
            purpose: Set(b.purpose),
            start_date: Set(b.span.start),
            end_date: Set(b.span.end),
            status: Set(b.status.as_str().to_string()),
            total_price: Set(b.total_price),
            created_at: Set(Utc::now()),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        model_to_domain(inserted)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_desc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_by_customer(&self, customer_id: i32) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::CustomerId.eq(customer_id))
            .order_by_desc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_by_status(&self, status: BookingStatus) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::Status.eq(status.as_str()))
            .order_by_desc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_for_vehicle(
        &self,
        vehicle_id: i32,
        statuses: &[BookingStatus],
    ) -> DomainResult<Vec<Booking>> {
        let status_strs: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
        let models = booking::Entity::find()
            .filter(booking::Column::CarId.eq(vehicle_id))
            .filter(booking::Column::Status.is_in(status_strs))
            .order_by_asc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn exists_for_vehicle(&self, vehicle_id: i32) -> DomainResult<bool> {
        let count = booking::Entity::find()
            .filter(booking::Column::CarId.eq(vehicle_id))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn advance_with_vehicle(
        &self,
        booking_id: i32,
        expected: BookingStatus,
        next: BookingStatus,
        vehicle_id: i32,
        vehicle_status: VehicleStatus,
    ) -> DomainResult<bool> {
        debug!(
            "Advancing booking {} {} -> {}",
            booking_id, expected, next
        );

        let txn = self.db.begin().await.map_err(db_err)?;

        if conditional_status_update(&txn, booking_id, expected, next).await? == 0 {
            // Not in the expected status; the dropped transaction writes nothing
            return Ok(false);
        }
        set_car_status(&txn, vehicle_id, vehicle_status).await?;

        txn.commit().await.map_err(db_err)?;
        Ok(true)
    }

    async fn record_return(
        &self,
        booking_id: i32,
        expected: BookingStatus,
        vehicle_id: i32,
    ) -> DomainResult<bool> {
        debug!("Recording return of booking {}", booking_id);

        let txn = self.db.begin().await.map_err(db_err)?;

        if conditional_status_update(&txn, booking_id, expected, BookingStatus::Returned).await? == 0
        {
            return Ok(false);
        }
        set_car_status(&txn, vehicle_id, VehicleStatus::Available).await?;

        let log = return_log::ActiveModel {
            id: NotSet,
            booking_id: Set(booking_id),
            returned_at: Set(Utc::now()),
            confirmed_by_staff: Set(false),
            confirmed_at: Set(None),
        };
        log.insert(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(true)
    }

    async fn cancel_into_archive(
        &self,
        archived: ArchivedBooking,
        expected: BookingStatus,
        restore_vehicle: bool,
    ) -> DomainResult<Option<ArchivedBooking>> {
        debug!(
            "Archiving booking {} as {}",
            archived.booking_id, archived.status
        );

        let txn = self.db.begin().await.map_err(db_err)?;

        let deleted = booking::Entity::delete_many()
            .filter(booking::Column::Id.eq(archived.booking_id))
            .filter(booking::Column::Status.eq(expected.as_str()))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        if deleted.rows_affected == 0 {
            return Ok(None);
        }

        let row = booking_history::ActiveModel {
            id: NotSet,
            booking_id: Set(archived.booking_id),
            customer_id: Set(archived.customer_id),
            car_id: Set(archived.vehicle_id),
            purpose: Set(archived.purpose),
            start_date: Set(archived.start_date),
            end_date: Set(archived.end_date),
            total_price: Set(archived.total_price),
            status: Set(archived.status.as_str().to_string()),
            booked_at: Set(archived.booked_at),
            archived_at: Set(archived.archived_at),
        };
        let stored = row.insert(&txn).await.map_err(db_err)?;

        if restore_vehicle {
            set_car_status(&txn, stored.car_id, VehicleStatus::Available).await?;
        }

        txn.commit().await.map_err(db_err)?;
        history_to_domain(stored).map(Some)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    use crate::infrastructure::database::migrator::Migrator;

    async fn test_db() -> DatabaseConnection {
        // One pooled connection keeps every query on the same in-memory db
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = Database::connect(opts).await.expect("connect");
        Migrator::up(&db, None).await.expect("migrate");
        db
    }

    async fn seed_car(db: &DatabaseConnection) -> i32 {
        let now = Utc::now();
        let row = car::ActiveModel {
            id: NotSet,
            name: Set("Cobalt".to_string()),
            category: Set("sedan".to_string()),
            color: Set("white".to_string()),
            status: Set(VehicleStatus::Available.as_str().to_string()),
            base_price: Set(500_000),
            base_duration_days: Set(3),
            description: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        row.insert(db).await.expect("seed car").id
    }

    #[tokio::test]
    async fn booking_roundtrips_through_the_database() {
        let db = test_db().await;
        let car_id = seed_car(&db).await;
        let repo = SeaOrmBookingRepository::new(db);

        let span = DateSpan::new(
            "2024-06-01".parse().expect("date"),
            "2024-06-03".parse().expect("date"),
        )
        .expect("span");
        let saved = repo
            .save(Booking::new(1, car_id, "trip", span, 500_000))
            .await
            .expect("save");

        let found = repo
            .find_by_id(saved.id)
            .await
            .expect("find")
            .expect("exists");
        assert_eq!(found.status, BookingStatus::Pending);
        assert_eq!(found.vehicle_id, car_id);
        assert_eq!(found.span, span);
    }

    #[tokio::test]
    async fn unknown_stored_status_is_a_storage_error() {
        let db = test_db().await;
        let car_id = seed_car(&db).await;

        // A row written around the closed enum, as a corrupted db would
        // hold it
        let row = booking::ActiveModel {
            id: NotSet,
            customer_id: Set(1),
            car_id: Set(car_id),
            purpose: Set("trip".to_string()),
            start_date: Set("2024-06-01".parse().expect("date")),
            end_date: Set("2024-06-03".parse().expect("date")),
            status: Set("approved".to_string()),
            total_price: Set(500_000),
            created_at: Set(Utc::now()),
        };
        let inserted = row.insert(&db).await.expect("insert");

        let repo = SeaOrmBookingRepository::new(db);
        let err = repo
            .find_by_id(inserted.id)
            .await
            .expect_err("corrupt row must not load");
        assert!(matches!(err, DomainError::Storage(_)));
    }
}
