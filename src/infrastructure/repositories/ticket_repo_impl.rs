// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::ticket::{
    Ticket, TicketFilter, TicketRouting, TicketStatus, TicketTransition, UnreadUpdate,
};
use crate::domain::repositories::ticket_repository::TicketRepository;
use crate::infrastructure::database::entities::ticket;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{sea_query::Expr, *};
use std::sync::Arc;
use uuid::Uuid;

/// 工单仓库实现
///
/// 路由字段只通过 `apply_transition` 的条件更新修改
#[derive(Clone)]
pub struct TicketRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl TicketRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<ticket::Model> for Ticket {
    fn from(model: ticket::Model) -> Self {
        Self {
            id: model.id,
            company_id: model.company_id,
            contact_id: model.contact_id,
            user_id: model.user_id,
            queue_id: model.queue_id,
            whatsapp_id: model.whatsapp_id,
            status: model.status.parse().unwrap_or_default(),
            unread_messages: model.unread_messages,
            last_message: model.last_message,
            flow_campaign_id: model.flow_campaign_id,
            flow_step_id: model.flow_step_id,
            flow_context: model.flow_context,
            flow_stopped: model.flow_stopped,
            typebot_session_id: model.typebot_session_id,
            typebot_status: model.typebot_status,
            use_integration: model.use_integration,
            integration_id: model.integration_id,
            prompt_id: model.prompt_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            closed_at: model.closed_at,
        }
    }
}

impl From<&Ticket> for ticket::ActiveModel {
    fn from(t: &Ticket) -> Self {
        Self {
            id: Set(t.id),
            company_id: Set(t.company_id),
            contact_id: Set(t.contact_id),
            user_id: Set(t.user_id),
            queue_id: Set(t.queue_id),
            whatsapp_id: Set(t.whatsapp_id),
            status: Set(t.status.to_string()),
            unread_messages: Set(t.unread_messages),
            last_message: Set(t.last_message.clone()),
            flow_campaign_id: Set(t.flow_campaign_id),
            flow_step_id: Set(t.flow_step_id.clone()),
            flow_context: Set(t.flow_context.clone()),
            flow_stopped: Set(t.flow_stopped),
            typebot_session_id: Set(t.typebot_session_id.clone()),
            typebot_status: Set(t.typebot_status),
            use_integration: Set(t.use_integration),
            integration_id: Set(t.integration_id),
            prompt_id: Set(t.prompt_id),
            created_at: Set(t.created_at),
            updated_at: Set(t.updated_at),
            closed_at: Set(t.closed_at),
        }
    }
}

/// 以读取时的路由快照为条件，空值用 `IS NULL` 比较
fn routing_condition(routing: &TicketRouting) -> Condition {
    let queue = match routing.queue_id {
        Some(id) => ticket::Column::QueueId.eq(id),
        None => ticket::Column::QueueId.is_null(),
    };
    let user = match routing.user_id {
        Some(id) => ticket::Column::UserId.eq(id),
        None => ticket::Column::UserId.is_null(),
    };
    Condition::all()
        .add(ticket::Column::Status.eq(routing.status.to_string()))
        .add(queue)
        .add(user)
}

#[async_trait]
impl TicketRepository for TicketRepositoryImpl {
    async fn create(&self, ticket: &Ticket) -> Result<Ticket, RepositoryError> {
        let model: ticket::ActiveModel = ticket.into();
        let inserted = model
            .insert(self.db.as_ref())
            .await
            .map_err(RepositoryError::from_write)?;
        Ok(inserted.into())
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Option<Ticket>, RepositoryError> {
        let model = ticket::Entity::find_by_id(id)
            .filter(ticket::Column::CompanyId.eq(company_id))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn owner_of(&self, id: Uuid) -> Result<Option<Uuid>, RepositoryError> {
        let owner: Option<Uuid> = ticket::Entity::find_by_id(id)
            .select_only()
            .column(ticket::Column::CompanyId)
            .into_tuple()
            .one(self.db.as_ref())
            .await?;
        Ok(owner)
    }

    async fn find_latest_for_contact(
        &self,
        company_id: Uuid,
        contact_id: Uuid,
        whatsapp_id: Option<Uuid>,
    ) -> Result<Option<Ticket>, RepositoryError> {
        let mut query = ticket::Entity::find()
            .filter(ticket::Column::CompanyId.eq(company_id))
            .filter(ticket::Column::ContactId.eq(contact_id));
        if let Some(whatsapp_id) = whatsapp_id {
            query = query.filter(ticket::Column::WhatsappId.eq(whatsapp_id));
        }

        let model = query
            .order_by_desc(ticket::Column::UpdatedAt)
            .order_by_desc(ticket::Column::CreatedAt)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_active_for_contact(
        &self,
        company_id: Uuid,
        contact_id: Uuid,
    ) -> Result<Option<Ticket>, RepositoryError> {
        let model = ticket::Entity::find()
            .filter(ticket::Column::CompanyId.eq(company_id))
            .filter(ticket::Column::ContactId.eq(contact_id))
            .filter(ticket::Column::Status.ne(TicketStatus::Closed.to_string()))
            .order_by_desc(ticket::Column::UpdatedAt)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, company_id: Uuid, filter: &TicketFilter) -> Result<Vec<Ticket>, RepositoryError> {
        let mut query = ticket::Entity::find().filter(ticket::Column::CompanyId.eq(company_id));
        if let Some(status) = filter.status {
            query = query.filter(ticket::Column::Status.eq(status.to_string()));
        }
        if let Some(queue_id) = filter.queue_id {
            query = query.filter(ticket::Column::QueueId.eq(queue_id));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(ticket::Column::UserId.eq(user_id));
        }

        let models = query
            .order_by_desc(ticket::Column::UpdatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn apply_transition(
        &self,
        transition: &TicketTransition,
        now: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let mut update = ticket::Entity::update_many()
            .col_expr(ticket::Column::Status, Expr::value(transition.to.status.to_string()))
            .col_expr(ticket::Column::QueueId, Expr::value(transition.to.queue_id))
            .col_expr(ticket::Column::UserId, Expr::value(transition.to.user_id))
            .col_expr(ticket::Column::UpdatedAt, Expr::value(now));

        update = match transition.unread {
            UnreadUpdate::Keep => update,
            UnreadUpdate::Reset => update.col_expr(ticket::Column::UnreadMessages, Expr::value(0)),
            UnreadUpdate::Increment => update.col_expr(
                ticket::Column::UnreadMessages,
                Expr::col(ticket::Column::UnreadMessages).add(1),
            ),
        };
        if let Some(closed_at) = transition.closed_at {
            update = update.col_expr(ticket::Column::ClosedAt, Expr::value(Some(closed_at)));
        }
        if transition.stop_automation {
            update = update
                .col_expr(ticket::Column::FlowStopped, Expr::value(true))
                .col_expr(ticket::Column::TypebotStatus, Expr::value(false));
        }

        let result = update
            .filter(ticket::Column::Id.eq(transition.ticket_id))
            .filter(ticket::Column::CompanyId.eq(transition.company_id))
            .filter(routing_condition(&transition.from))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected == 1)
    }

    async fn update_preview(
        &self,
        company_id: Uuid,
        id: Uuid,
        preview: &str,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        ticket::Entity::update_many()
            .col_expr(ticket::Column::LastMessage, Expr::value(preview))
            .col_expr(ticket::Column::UpdatedAt, Expr::value(now))
            .filter(ticket::Column::Id.eq(id))
            .filter(ticket::Column::CompanyId.eq(company_id))
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }
}
