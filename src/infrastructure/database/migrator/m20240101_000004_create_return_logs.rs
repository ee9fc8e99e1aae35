//! Create return_logs table
//!
//! One row per booking that reaches `returned`, awaiting staff sign-off.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_bookings::Bookings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReturnLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReturnLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ReturnLogs::BookingId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ReturnLogs::ReturnedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReturnLogs::ConfirmedByStaff)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ReturnLogs::ConfirmedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_return_logs_booking")
                            .from(ReturnLogs::Table, ReturnLogs::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReturnLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ReturnLogs {
    Table,
    Id,
    BookingId,
    ReturnedAt,
    ConfirmedByStaff,
    ConfirmedAt,
}
