// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

use super::m20260101_000001_create_tenancy::{Companies, Queues, Users};

/// 会话相关表：联系人、渠道连接、工单及消息
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Contacts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Contacts::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Contacts::Name).string().not_null())
                    .col(ColumnDef::new(Contacts::Number).string().not_null())
                    .col(ColumnDef::new(Contacts::Email).string().null())
                    .col(
                        ColumnDef::new(Contacts::IsGroup)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Contacts::IxcId).string().null())
                    .col(ColumnDef::new(Contacts::Cpf).string().null())
                    .col(
                        ColumnDef::new(Contacts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contacts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contacts_company")
                            .from(Contacts::Table, Contacts::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Connections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Connections::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Connections::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Connections::Name).string().not_null())
                    .col(ColumnDef::new(Connections::Status).string().not_null())
                    .col(ColumnDef::new(Connections::GreetingMessage).text().null())
                    .col(ColumnDef::new(Connections::FarewellMessage).text().null())
                    .col(
                        ColumnDef::new(Connections::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Connections::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Connections::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_connections_company")
                            .from(Connections::Table, Connections::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tickets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tickets::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Tickets::ContactId).uuid().not_null())
                    .col(ColumnDef::new(Tickets::UserId).uuid().null())
                    .col(ColumnDef::new(Tickets::QueueId).uuid().null())
                    .col(ColumnDef::new(Tickets::WhatsappId).uuid().null())
                    .col(ColumnDef::new(Tickets::Status).string().not_null())
                    .col(
                        ColumnDef::new(Tickets::UnreadMessages)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tickets::LastMessage)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Tickets::FlowCampaignId).uuid().null())
                    .col(ColumnDef::new(Tickets::FlowStepId).string().null())
                    .col(ColumnDef::new(Tickets::FlowContext).json().null())
                    .col(
                        ColumnDef::new(Tickets::FlowStopped)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Tickets::TypebotSessionId).string().null())
                    .col(
                        ColumnDef::new(Tickets::TypebotStatus)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Tickets::UseIntegration)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Tickets::IntegrationId).uuid().null())
                    .col(ColumnDef::new(Tickets::PromptId).uuid().null())
                    .col(
                        ColumnDef::new(Tickets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tickets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tickets::ClosedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_company")
                            .from(Tickets::Table, Tickets::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_contact")
                            .from(Tickets::Table, Tickets::ContactId)
                            .to(Contacts::Table, Contacts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_user")
                            .from(Tickets::Table, Tickets::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_queue")
                            .from(Tickets::Table, Tickets::QueueId)
                            .to(Queues::Table, Queues::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Messages keep their channel-native id, unique per company; rows are never cascaded away.
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Messages::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Messages::Id).string().not_null())
                    .col(ColumnDef::new(Messages::TicketId).uuid().not_null())
                    .col(ColumnDef::new(Messages::ContactId).uuid().null())
                    .col(ColumnDef::new(Messages::Body).text().not_null())
                    .col(ColumnDef::new(Messages::Ack).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Messages::Read)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Messages::MediaType).string().null())
                    .col(ColumnDef::new(Messages::MediaUrl).string().null())
                    .col(
                        ColumnDef::new(Messages::FromMe)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Messages::IsPrivate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Messages::QuotedMsgId).string().null())
                    .col(
                        ColumnDef::new(Messages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Messages::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_messages")
                            .col(Messages::CompanyId)
                            .col(Messages::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_messages_ticket")
                            .from(Messages::Table, Messages::TicketId)
                            .to(Tickets::Table, Tickets::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tickets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Connections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contacts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Contacts {
    Table,
    Id,
    CompanyId,
    Name,
    Number,
    Email,
    IsGroup,
    IxcId,
    Cpf,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Connections {
    Table,
    Id,
    CompanyId,
    Name,
    Status,
    GreetingMessage,
    FarewellMessage,
    IsDefault,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Tickets {
    Table,
    Id,
    CompanyId,
    ContactId,
    UserId,
    QueueId,
    WhatsappId,
    Status,
    UnreadMessages,
    LastMessage,
    FlowCampaignId,
    FlowStepId,
    FlowContext,
    FlowStopped,
    TypebotSessionId,
    TypebotStatus,
    UseIntegration,
    IntegrationId,
    PromptId,
    CreatedAt,
    UpdatedAt,
    ClosedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Messages {
    Table,
    Id,
    CompanyId,
    TicketId,
    ContactId,
    Body,
    Ack,
    Read,
    MediaType,
    MediaUrl,
    FromMe,
    IsPrivate,
    QuotedMsgId,
    CreatedAt,
    UpdatedAt,
}
