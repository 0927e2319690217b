// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::queue::Queue;
use crate::domain::models::ticket::TicketStatus;
use crate::domain::repositories::queue_repository::QueueRepository;
use crate::infrastructure::database::entities::{queue, ticket, user_queue};
use crate::infrastructure::repositories::company_repo_impl::lock_company;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{sea_query::Expr, *};
use std::sync::Arc;
use uuid::Uuid;

/// 队列仓库实现
#[derive(Clone)]
pub struct QueueRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl QueueRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<queue::Model> for Queue {
    fn from(model: queue::Model) -> Self {
        Self {
            id: model.id,
            company_id: model.company_id,
            name: model.name,
            color: model.color,
            greeting_message: model.greeting_message,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Queue> for queue::ActiveModel {
    fn from(queue: &Queue) -> Self {
        Self {
            id: Set(queue.id),
            company_id: Set(queue.company_id),
            name: Set(queue.name.clone()),
            color: Set(queue.color.clone()),
            greeting_message: Set(queue.greeting_message.clone()),
            created_at: Set(queue.created_at),
            updated_at: Set(queue.updated_at),
        }
    }
}

#[async_trait]
impl QueueRepository for QueueRepositoryImpl {
    async fn create(&self, queue: &Queue) -> Result<Queue, RepositoryError> {
        let model: queue::ActiveModel = queue.into();
        let inserted = model
            .insert(self.db.as_ref())
            .await
            .map_err(RepositoryError::from_write)?;
        Ok(inserted.into())
    }

    async fn create_capped(&self, queue: &Queue, cap: u64) -> Result<Option<Queue>, RepositoryError> {
        let txn = self.db.begin().await?;
        lock_company(&txn, queue.company_id).await?;

        let current = queue::Entity::find()
            .filter(queue::Column::CompanyId.eq(queue.company_id))
            .count(&txn)
            .await?;
        if current >= cap {
            txn.rollback().await?;
            return Ok(None);
        }

        let model: queue::ActiveModel = queue.into();
        let inserted = model.insert(&txn).await.map_err(RepositoryError::from_write)?;
        txn.commit().await?;
        Ok(Some(inserted.into()))
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Option<Queue>, RepositoryError> {
        let model = queue::Entity::find_by_id(id)
            .filter(queue::Column::CompanyId.eq(company_id))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_many(&self, company_id: Uuid, ids: &[Uuid]) -> Result<Vec<Queue>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = queue::Entity::find()
            .filter(queue::Column::CompanyId.eq(company_id))
            .filter(queue::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list(&self, company_id: Uuid) -> Result<Vec<Queue>, RepositoryError> {
        let models = queue::Entity::find()
            .filter(queue::Column::CompanyId.eq(company_id))
            .order_by_asc(queue::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, queue: &Queue) -> Result<Queue, RepositoryError> {
        let result = queue::Entity::update_many()
            .col_expr(queue::Column::Name, Expr::value(queue.name.clone()))
            .col_expr(queue::Column::Color, Expr::value(queue.color.clone()))
            .col_expr(
                queue::Column::GreetingMessage,
                Expr::value(queue.greeting_message.clone()),
            )
            .col_expr(queue::Column::UpdatedAt, Expr::value(queue.updated_at))
            .filter(queue::Column::Id.eq(queue.id))
            .filter(queue::Column::CompanyId.eq(queue.company_id))
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(queue.clone())
    }

    async fn delete_detaching(&self, company_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        let txn = self.db.begin().await?;

        let exists = queue::Entity::find_by_id(id)
            .filter(queue::Column::CompanyId.eq(company_id))
            .one(&txn)
            .await?
            .is_some();
        if !exists {
            txn.rollback().await?;
            return Ok(false);
        }

        let now = Utc::now();

        // 无坐席且未结束的工单回到待分配
        ticket::Entity::update_many()
            .col_expr(ticket::Column::Status, Expr::value(TicketStatus::Pending.to_string()))
            .col_expr(ticket::Column::UpdatedAt, Expr::value(now))
            .filter(ticket::Column::CompanyId.eq(company_id))
            .filter(ticket::Column::QueueId.eq(id))
            .filter(ticket::Column::UserId.is_null())
            .filter(ticket::Column::Status.ne(TicketStatus::Closed.to_string()))
            .exec(&txn)
            .await?;

        ticket::Entity::update_many()
            .col_expr(ticket::Column::QueueId, Expr::value(Option::<Uuid>::None))
            .col_expr(ticket::Column::UpdatedAt, Expr::value(now))
            .filter(ticket::Column::CompanyId.eq(company_id))
            .filter(ticket::Column::QueueId.eq(id))
            .exec(&txn)
            .await?;

        user_queue::Entity::delete_many()
            .filter(user_queue::Column::QueueId.eq(id))
            .exec(&txn)
            .await?;

        queue::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(true)
    }

    async fn count(&self, company_id: Uuid) -> Result<u64, RepositoryError> {
        let count = queue::Entity::find()
            .filter(queue::Column::CompanyId.eq(company_id))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }
}
