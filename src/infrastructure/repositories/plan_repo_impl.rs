// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::plan::Plan;
use crate::domain::repositories::plan_repository::PlanRepository;
use crate::infrastructure::database::entities::{company, plan};
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 套餐仓库实现
#[derive(Clone)]
pub struct PlanRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl PlanRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<plan::Model> for Plan {
    fn from(model: plan::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            users: model.users,
            connections: model.connections,
            queues: model.queues,
            amount_cents: model.amount_cents,
            use_campaigns: model.use_campaigns,
            use_kanban: model.use_kanban,
            use_open_ai: model.use_open_ai,
            use_integrations: model.use_integrations,
            use_schedules: model.use_schedules,
            use_internal_chat: model.use_internal_chat,
            use_external_api: model.use_external_api,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Plan> for plan::ActiveModel {
    fn from(plan: &Plan) -> Self {
        Self {
            id: Set(plan.id),
            name: Set(plan.name.clone()),
            users: Set(plan.users),
            connections: Set(plan.connections),
            queues: Set(plan.queues),
            amount_cents: Set(plan.amount_cents),
            use_campaigns: Set(plan.use_campaigns),
            use_kanban: Set(plan.use_kanban),
            use_open_ai: Set(plan.use_open_ai),
            use_integrations: Set(plan.use_integrations),
            use_schedules: Set(plan.use_schedules),
            use_internal_chat: Set(plan.use_internal_chat),
            use_external_api: Set(plan.use_external_api),
            created_at: Set(plan.created_at),
            updated_at: Set(plan.updated_at),
        }
    }
}

#[async_trait]
impl PlanRepository for PlanRepositoryImpl {
    async fn create(&self, plan: &Plan) -> Result<Plan, RepositoryError> {
        let model: plan::ActiveModel = plan.into();
        let inserted = model
            .insert(self.db.as_ref())
            .await
            .map_err(RepositoryError::from_write)?;
        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>, RepositoryError> {
        let model = plan::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Plan>, RepositoryError> {
        let models = plan::Entity::find()
            .order_by_asc(plan::Column::AmountCents)
            .order_by_asc(plan::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, plan: &Plan) -> Result<Plan, RepositoryError> {
        let model: plan::ActiveModel = plan.into();
        let updated = model.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepositoryError::NotFound,
            other => RepositoryError::Database(other),
        })?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = plan::Entity::delete_by_id(id).exec(self.db.as_ref()).await?;
        Ok(result.rows_affected > 0)
    }

    async fn count_companies(&self, plan_id: Uuid) -> Result<u64, RepositoryError> {
        let count = company::Entity::find()
            .filter(company::Column::PlanId.eq(plan_id))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }
}
