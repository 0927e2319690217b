// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::message::{AckLevel, Message};
use crate::domain::repositories::message_repository::MessageRepository;
use crate::infrastructure::database::entities::message;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{sea_query::Expr, *};
use std::sync::Arc;
use uuid::Uuid;

/// 消息仓库实现
#[derive(Clone)]
pub struct MessageRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl MessageRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<message::Model> for Message {
    fn from(model: message::Model) -> Self {
        Self {
            id: model.id,
            company_id: model.company_id,
            ticket_id: model.ticket_id,
            contact_id: model.contact_id,
            body: model.body,
            ack: AckLevel::try_from(model.ack).unwrap_or_default(),
            read: model.read,
            media_type: model.media_type,
            media_url: model.media_url,
            from_me: model.from_me,
            is_private: model.is_private,
            quoted_msg_id: model.quoted_msg_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl MessageRepository for MessageRepositoryImpl {
    async fn append(&self, msg: &Message) -> Result<bool, RepositoryError> {
        let exists = message::Entity::find_by_id((msg.company_id, msg.id.clone()))
            .count(self.db.as_ref())
            .await?
            > 0;
        if exists {
            return Ok(false);
        }

        let model = message::ActiveModel {
            id: Set(msg.id.clone()),
            company_id: Set(msg.company_id),
            ticket_id: Set(msg.ticket_id),
            contact_id: Set(msg.contact_id),
            body: Set(msg.body.clone()),
            ack: Set(msg.ack.as_i32()),
            read: Set(msg.read),
            media_type: Set(msg.media_type.clone()),
            media_url: Set(msg.media_url.clone()),
            from_me: Set(msg.from_me),
            is_private: Set(msg.is_private),
            quoted_msg_id: Set(msg.quoted_msg_id.clone()),
            created_at: Set(msg.created_at),
            updated_at: Set(msg.updated_at),
        };

        // 同一租户内的并发重复投递由主键兜底
        match model.insert(self.db.as_ref()).await {
            Ok(_) => Ok(true),
            Err(e) => match RepositoryError::from_write(e) {
                RepositoryError::Conflict => Ok(false),
                other => Err(other),
            },
        }
    }

    async fn find_by_id(&self, company_id: Uuid, id: &str) -> Result<Option<Message>, RepositoryError> {
        let model = message::Entity::find_by_id((company_id, id.to_string()))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_for_channel(
        &self,
        company_id: Option<Uuid>,
        id: &str,
    ) -> Result<Option<Message>, RepositoryError> {
        let mut query = message::Entity::find()
            .filter(message::Column::Id.eq(id))
            .filter(message::Column::FromMe.eq(true));
        if let Some(company_id) = company_id {
            query = query.filter(message::Column::CompanyId.eq(company_id));
        }
        let model = query.one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn list_for_ticket(&self, company_id: Uuid, ticket_id: Uuid) -> Result<Vec<Message>, RepositoryError> {
        let models = message::Entity::find()
            .filter(message::Column::CompanyId.eq(company_id))
            .filter(message::Column::TicketId.eq(ticket_id))
            .order_by_asc(message::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn recent_public(
        &self,
        company_id: Uuid,
        ticket_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Message>, RepositoryError> {
        let models = message::Entity::find()
            .filter(message::Column::CompanyId.eq(company_id))
            .filter(message::Column::TicketId.eq(ticket_id))
            .filter(message::Column::IsPrivate.eq(false))
            .order_by_desc(message::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;
        let mut messages: Vec<Message> = models.into_iter().map(Into::into).collect();
        messages.reverse();
        Ok(messages)
    }

    async fn update_ack(
        &self,
        company_id: Option<Uuid>,
        id: &str,
        ack: AckLevel,
    ) -> Result<bool, RepositoryError> {
        let mut update = message::Entity::update_many()
            .col_expr(message::Column::Ack, Expr::value(ack.as_i32()))
            .col_expr(message::Column::UpdatedAt, Expr::value(Utc::now()));
        if ack.is_read() {
            update = update.col_expr(message::Column::Read, Expr::value(true));
        }

        update = update
            .filter(message::Column::Id.eq(id))
            .filter(message::Column::FromMe.eq(true))
            .filter(message::Column::Ack.lt(ack.as_i32()));
        if let Some(company_id) = company_id {
            update = update.filter(message::Column::CompanyId.eq(company_id));
        }

        let result = update.exec(self.db.as_ref()).await?;
        Ok(result.rows_affected > 0)
    }

    async fn mark_ticket_read(&self, company_id: Uuid, ticket_id: Uuid) -> Result<u64, RepositoryError> {
        let result = message::Entity::update_many()
            .col_expr(message::Column::Read, Expr::value(true))
            .filter(message::Column::CompanyId.eq(company_id))
            .filter(message::Column::TicketId.eq(ticket_id))
            .filter(message::Column::Read.eq(false))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }
}
