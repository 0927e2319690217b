// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::schedule::{Schedule, ScheduleStatus};
use crate::domain::repositories::schedule_repository::ScheduleRepository;
use crate::infrastructure::database::entities::schedule;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{sea_query::Expr, *};
use std::sync::Arc;
use uuid::Uuid;

/// 定时消息仓库实现
#[derive(Clone)]
pub struct ScheduleRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ScheduleRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<schedule::Model> for Schedule {
    fn from(model: schedule::Model) -> Self {
        Self {
            id: model.id,
            company_id: model.company_id,
            ticket_id: model.ticket_id,
            contact_id: model.contact_id,
            user_id: model.user_id,
            body: model.body,
            send_at: model.send_at,
            status: model.status.parse().unwrap_or_default(),
            sent_at: model.sent_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl ScheduleRepository for ScheduleRepositoryImpl {
    async fn create(&self, s: &Schedule) -> Result<Schedule, RepositoryError> {
        let model = schedule::ActiveModel {
            id: Set(s.id),
            company_id: Set(s.company_id),
            ticket_id: Set(s.ticket_id),
            contact_id: Set(s.contact_id),
            user_id: Set(s.user_id),
            body: Set(s.body.clone()),
            send_at: Set(s.send_at),
            status: Set(s.status.to_string()),
            sent_at: Set(s.sent_at),
            created_at: Set(s.created_at),
            updated_at: Set(s.updated_at),
        };
        let inserted = model
            .insert(self.db.as_ref())
            .await
            .map_err(RepositoryError::from_write)?;
        Ok(inserted.into())
    }

    async fn list_for_ticket(
        &self,
        company_id: Uuid,
        ticket_id: Uuid,
    ) -> Result<Vec<Schedule>, RepositoryError> {
        let models = schedule::Entity::find()
            .filter(schedule::Column::CompanyId.eq(company_id))
            .filter(schedule::Column::TicketId.eq(ticket_id))
            .order_by_asc(schedule::Column::SendAt)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn delete_pending(&self, company_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        let result = schedule::Entity::delete_many()
            .filter(schedule::Column::Id.eq(id))
            .filter(schedule::Column::CompanyId.eq(company_id))
            .filter(schedule::Column::Status.eq(ScheduleStatus::Pending.to_string()))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_due(&self, now: DateTime<Utc>, limit: u64) -> Result<Vec<Schedule>, RepositoryError> {
        let models = schedule::Entity::find()
            .filter(schedule::Column::Status.eq(ScheduleStatus::Pending.to_string()))
            .filter(schedule::Column::SendAt.lte(now))
            .order_by_asc(schedule::Column::SendAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn claim(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        let result = schedule::Entity::update_many()
            .col_expr(
                schedule::Column::Status,
                Expr::value(ScheduleStatus::Processing.to_string()),
            )
            .col_expr(schedule::Column::UpdatedAt, Expr::value(at))
            .filter(schedule::Column::Id.eq(id))
            .filter(schedule::Column::Status.eq(ScheduleStatus::Pending.to_string()))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected == 1)
    }

    async fn finish(
        &self,
        id: Uuid,
        status: ScheduleStatus,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let sent_at = (status == ScheduleStatus::Sent).then_some(at);
        let result = schedule::Entity::update_many()
            .col_expr(schedule::Column::Status, Expr::value(status.to_string()))
            .col_expr(schedule::Column::SentAt, Expr::value(sent_at))
            .col_expr(schedule::Column::UpdatedAt, Expr::value(at))
            .filter(schedule::Column::Id.eq(id))
            .filter(schedule::Column::Status.eq(ScheduleStatus::Processing.to_string()))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected > 0)
    }
}
