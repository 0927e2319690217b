// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

/// 工单数据库实体模型
///
/// 路由字段 `(status, queue_id, user_id)` 只通过条件更新修改
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub contact_id: Uuid,
    pub user_id: Option<Uuid>,
    pub queue_id: Option<Uuid>,
    pub whatsapp_id: Option<Uuid>,
    pub status: String,
    pub unread_messages: i32,
    #[sea_orm(column_type = "Text")]
    pub last_message: String,
    pub flow_campaign_id: Option<Uuid>,
    pub flow_step_id: Option<String>,
    pub flow_context: Option<Json>,
    pub flow_stopped: bool,
    pub typebot_session_id: Option<String>,
    pub typebot_status: bool,
    pub use_integration: bool,
    pub integration_id: Option<Uuid>,
    pub prompt_id: Option<Uuid>,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
    pub closed_at: Option<ChronoDateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contact::Entity",
        from = "Column::ContactId",
        to = "super::contact::Column::Id"
    )]
    Contact,
    #[sea_orm(has_many = "super::message::Entity")]
    Messages,
}

impl Related<super::contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
    }
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
