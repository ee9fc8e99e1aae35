//! Create booking_history table
//!
//! Archive of cancelled/expired bookings. No foreign keys: a history row
//! must outlive both the booking row (deleted on cancel) and the car.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookingHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BookingHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BookingHistory::BookingId).integer().not_null())
                    .col(
                        ColumnDef::new(BookingHistory::CustomerId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BookingHistory::CarId).integer().not_null())
                    .col(ColumnDef::new(BookingHistory::Purpose).string().not_null())
                    .col(ColumnDef::new(BookingHistory::StartDate).date().not_null())
                    .col(ColumnDef::new(BookingHistory::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(BookingHistory::TotalPrice)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BookingHistory::Status)
                            .string()
                            .not_null()
                            .default("cancelled"),
                    )
                    .col(
                        ColumnDef::new(BookingHistory::BookedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BookingHistory::ArchivedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_history_customer")
                    .table(BookingHistory::Table)
                    .col(BookingHistory::CustomerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingHistory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BookingHistory {
    Table,
    Id,
    BookingId,
    CustomerId,
    CarId,
    Purpose,
    StartDate,
    EndDate,
    TotalPrice,
    Status,
    BookedAt,
    ArchivedAt,
}
