// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

use super::m20260101_000001_create_tenancy::{Settings, Users};
use super::m20260101_000002_create_conversations::{Contacts, Messages, Tickets};
use super::m20260101_000003_create_billing::{Invoices, Schedules};

/// 索引迁移
///
/// 所有租户查询都以 company_id 开头
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("uq_users_company_email")
                    .table(Users::Table)
                    .col(Users::CompanyId)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_contacts_company_number")
                    .table(Contacts::Table)
                    .col(Contacts::CompanyId)
                    .col(Contacts::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tickets_company_status")
                    .table(Tickets::Table)
                    .col(Tickets::CompanyId)
                    .col(Tickets::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tickets_contact")
                    .table(Tickets::Table)
                    .col(Tickets::CompanyId)
                    .col(Tickets::ContactId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_messages_ticket")
                    .table(Messages::Table)
                    .col(Messages::CompanyId)
                    .col(Messages::TicketId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_settings_company_key")
                    .table(Settings::Table)
                    .col(Settings::CompanyId)
                    .col(Settings::Key)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invoices_status_due")
                    .table(Invoices::Table)
                    .col(Invoices::Status)
                    .col(Invoices::DueDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_status_send_at")
                    .table(Schedules::Table)
                    .col(Schedules::Status)
                    .col(Schedules::SendAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_schedules_status_send_at")
                    .table(Schedules::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_invoices_status_due")
                    .table(Invoices::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_settings_company_key")
                    .table(Settings::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_messages_ticket")
                    .table(Messages::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_tickets_contact")
                    .table(Tickets::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_tickets_company_status")
                    .table(Tickets::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("uq_contacts_company_number")
                    .table(Contacts::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("uq_users_company_email")
                    .table(Users::Table)
                    .to_owned(),
            )
            .await
    }
}
