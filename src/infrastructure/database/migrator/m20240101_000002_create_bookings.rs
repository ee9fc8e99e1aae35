//! Create bookings table
//!
//! Live reservations. The car_id + status indexes serve the conflict-scan
//! path (every create reads a car's active bookings).

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_cars::Cars;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::CustomerId).integer().not_null())
                    .col(ColumnDef::new(Bookings::CarId).integer().not_null())
                    .col(ColumnDef::new(Bookings::Purpose).string().not_null())
                    .col(ColumnDef::new(Bookings::StartDate).date().not_null())
                    .col(ColumnDef::new(Bookings::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Bookings::TotalPrice).big_integer().not_null())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_car")
                            .from(Bookings::Table, Bookings::CarId)
                            .to(Cars::Table, Cars::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_car")
                    .table(Bookings::Table)
                    .col(Bookings::CarId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_status")
                    .table(Bookings::Table)
                    .col(Bookings::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_customer")
                    .table(Bookings::Table)
                    .col(Bookings::CustomerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Id,
    CustomerId,
    CarId,
    Purpose,
    StartDate,
    EndDate,
    Status,
    TotalPrice,
    CreatedAt,
}
