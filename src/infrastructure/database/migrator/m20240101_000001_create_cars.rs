//! Create cars table
//!
//! The fleet. `status` is the availability projection owned by the booking
//! state machine.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cars::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cars::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cars::Name).string().not_null())
                    .col(ColumnDef::new(Cars::Category).string().not_null())
                    .col(ColumnDef::new(Cars::Color).string().not_null())
                    .col(
                        ColumnDef::new(Cars::Status)
                            .string()
                            .not_null()
                            .default("available"),
                    )
                    .col(ColumnDef::new(Cars::BasePrice).big_integer().not_null())
                    .col(
                        ColumnDef::new(Cars::BaseDurationDays)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Cars::Description).string())
                    .col(
                        ColumnDef::new(Cars::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cars::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cars_status")
                    .table(Cars::Table)
                    .col(Cars::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cars::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Cars {
    Table,
    Id,
    Name,
    Category,
    Color,
    Status,
    BasePrice,
    BaseDurationDays,
    Description,
    CreatedAt,
    UpdatedAt,
}
