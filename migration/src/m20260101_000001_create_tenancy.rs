// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

/// 租户基础表：套餐、公司、用户、队列及系统设置
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. plans (no dependencies)
        manager
            .create_table(
                Table::create()
                    .table(Plans::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Plans::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Plans::Name).string().not_null())
                    .col(ColumnDef::new(Plans::Users).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Plans::Connections)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Plans::Queues).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Plans::AmountCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(&mut bool_col(Plans::UseCampaigns))
                    .col(&mut bool_col(Plans::UseKanban))
                    .col(&mut bool_col(Plans::UseOpenAi))
                    .col(&mut bool_col(Plans::UseIntegrations))
                    .col(&mut bool_col(Plans::UseSchedules))
                    .col(&mut bool_col(Plans::UseInternalChat))
                    .col(&mut bool_col(Plans::UseExternalApi))
                    .col(&mut timestamp_col(Plans::CreatedAt))
                    .col(&mut timestamp_col(Plans::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // 2. companies (depends on plans)
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Companies::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Companies::Name).string().not_null())
                    .col(ColumnDef::new(Companies::Email).string().null())
                    .col(ColumnDef::new(Companies::Phone).string().null())
                    .col(
                        ColumnDef::new(Companies::Status)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Companies::DueDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Companies::PlanId).uuid().not_null())
                    .col(&mut timestamp_col(Companies::CreatedAt))
                    .col(&mut timestamp_col(Companies::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_companies_plan")
                            .from(Companies::Table, Companies::PlanId)
                            .to(Plans::Table, Plans::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 3. users (depends on companies)
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Profile).string().not_null())
                    .col(
                        ColumnDef::new(Users::TokenVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Users::Active).boolean().not_null().default(true))
                    .col(&mut bool_col(Users::SuperAdmin))
                    .col(
                        ColumnDef::new(Users::LastSeenAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(&mut timestamp_col(Users::CreatedAt))
                    .col(&mut timestamp_col(Users::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_company")
                            .from(Users::Table, Users::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 4. queues (depends on companies)
        manager
            .create_table(
                Table::create()
                    .table(Queues::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Queues::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Queues::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Queues::Name).string().not_null())
                    .col(ColumnDef::new(Queues::Color).string().not_null())
                    .col(ColumnDef::new(Queues::GreetingMessage).text().null())
                    .col(&mut timestamp_col(Queues::CreatedAt))
                    .col(&mut timestamp_col(Queues::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_queues_company")
                            .from(Queues::Table, Queues::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 5. user_queues (many-to-many, no cascades)
        manager
            .create_table(
                Table::create()
                    .table(UserQueues::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserQueues::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserQueues::QueueId).uuid().not_null())
                    .col(ColumnDef::new(UserQueues::CompanyId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserQueues::UserId)
                            .col(UserQueues::QueueId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_queues_user")
                            .from(UserQueues::Table, UserQueues::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_queues_queue")
                            .from(UserQueues::Table, UserQueues::QueueId)
                            .to(Queues::Table, Queues::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 6. settings (company_id NULL = global row)
        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Settings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Settings::CompanyId).uuid().null())
                    .col(ColumnDef::new(Settings::Key).string().not_null())
                    .col(ColumnDef::new(Settings::Value).text().not_null())
                    .col(&mut timestamp_col(Settings::CreatedAt))
                    .col(&mut timestamp_col(Settings::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Settings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserQueues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Queues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Plans::Table).to_owned())
            .await
    }
}

fn bool_col<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .boolean()
        .not_null()
        .default(false)
        .to_owned()
}

fn timestamp_col<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[derive(DeriveIden)]
pub(crate) enum Plans {
    Table,
    Id,
    Name,
    Users,
    Connections,
    Queues,
    AmountCents,
    UseCampaigns,
    UseKanban,
    UseOpenAi,
    UseIntegrations,
    UseSchedules,
    UseInternalChat,
    UseExternalApi,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Companies {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Status,
    DueDate,
    PlanId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    CompanyId,
    Name,
    Email,
    PasswordHash,
    Profile,
    TokenVersion,
    Active,
    SuperAdmin,
    LastSeenAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Queues {
    Table,
    Id,
    CompanyId,
    Name,
    Color,
    GreetingMessage,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum UserQueues {
    Table,
    UserId,
    QueueId,
    CompanyId,
}

#[derive(DeriveIden)]
pub(crate) enum Settings {
    Table,
    Id,
    CompanyId,
    Key,
    Value,
    CreatedAt,
    UpdatedAt,
}
