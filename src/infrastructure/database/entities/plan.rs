// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

/// 套餐数据库实体模型
///
/// 对应 plans 表，容量字段为 0 表示不限
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub users: i32,
    pub connections: i32,
    pub queues: i32,
    pub amount_cents: i64,
    pub use_campaigns: bool,
    pub use_kanban: bool,
    pub use_open_ai: bool,
    pub use_integrations: bool,
    pub use_schedules: bool,
    pub use_internal_chat: bool,
    pub use_external_api: bool,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::company::Entity")]
    Companies,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
