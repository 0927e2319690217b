// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

use super::m20260101_000001_create_tenancy::Companies;
use super::m20260101_000002_create_conversations::Tickets;

/// 账单与定时发送表
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Invoices::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Invoices::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Invoices::Detail).string().not_null())
                    .col(
                        ColumnDef::new(Invoices::ValueCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Invoices::Status).string().not_null())
                    .col(
                        ColumnDef::new(Invoices::DueDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Invoices::PaidAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Invoices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Invoices::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoices_company")
                            .from(Invoices::Table, Invoices::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schedules::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Schedules::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Schedules::TicketId).uuid().not_null())
                    .col(ColumnDef::new(Schedules::ContactId).uuid().not_null())
                    .col(ColumnDef::new(Schedules::UserId).uuid().null())
                    .col(ColumnDef::new(Schedules::Body).text().not_null())
                    .col(
                        ColumnDef::new(Schedules::SendAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Schedules::Status).string().not_null())
                    .col(
                        ColumnDef::new(Schedules::SentAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Schedules::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Schedules::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schedules_ticket")
                            .from(Schedules::Table, Schedules::TicketId)
                            .to(Tickets::Table, Tickets::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Invoices {
    Table,
    Id,
    CompanyId,
    Detail,
    ValueCents,
    Status,
    DueDate,
    PaidAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Schedules {
    Table,
    Id,
    CompanyId,
    TicketId,
    ContactId,
    UserId,
    Body,
    SendAt,
    Status,
    SentAt,
    CreatedAt,
    UpdatedAt,
}
