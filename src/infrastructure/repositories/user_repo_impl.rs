// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::user::User;
use crate::domain::repositories::user_repository::UserRepository;
use crate::infrastructure::database::entities::{user, user_queue};
use crate::infrastructure::repositories::company_repo_impl::lock_company;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{sea_query::Expr, *};
use std::sync::Arc;
use uuid::Uuid;

/// 坐席仓库实现
///
/// 所有查询都带 `company_id` 条件，只有登录时按邮箱跨公司查找
#[derive(Clone)]
pub struct UserRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            company_id: model.company_id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            profile: model.profile.parse().unwrap_or_default(),
            token_version: model.token_version,
            active: model.active,
            super_admin: model.super_admin,
            last_seen_at: model.last_seen_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&User> for user::ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            id: Set(user.id),
            company_id: Set(user.company_id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            profile: Set(user.profile.to_string()),
            token_version: Set(user.token_version),
            active: Set(user.active),
            super_admin: Set(user.super_admin),
            last_seen_at: Set(user.last_seen_at),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let model: user::ActiveModel = user.into();
        let inserted = model
            .insert(self.db.as_ref())
            .await
            .map_err(RepositoryError::from_write)?;
        Ok(inserted.into())
    }

    async fn create_capped(&self, user: &User, cap: u64) -> Result<Option<User>, RepositoryError> {
        let txn = self.db.begin().await?;
        lock_company(&txn, user.company_id).await?;

        let current = user::Entity::find()
            .filter(user::Column::CompanyId.eq(user.company_id))
            .count(&txn)
            .await?;
        if current >= cap {
            txn.rollback().await?;
            return Ok(None);
        }

        let model: user::ActiveModel = user.into();
        let inserted = model.insert(&txn).await.map_err(RepositoryError::from_write)?;
        txn.commit().await?;
        Ok(Some(inserted.into()))
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let model = user::Entity::find_by_id(id)
            .filter(user::Column::CompanyId.eq(company_id))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_email_any_company(&self, email: &str) -> Result<Vec<User>, RepositoryError> {
        let models = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_email(
        &self,
        company_id: Uuid,
        email: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let model = user::Entity::find()
            .filter(user::Column::CompanyId.eq(company_id))
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, company_id: Uuid) -> Result<Vec<User>, RepositoryError> {
        let models = user::Entity::find()
            .filter(user::Column::CompanyId.eq(company_id))
            .order_by_asc(user::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        let mut model: user::ActiveModel = user.into();
        // 版本号只通过 bump_token_version 原子递增
        model.token_version = NotSet;
        model.created_at = NotSet;
        model.last_seen_at = NotSet;

        let result = user::Entity::update_many()
            .set(model)
            .filter(user::Column::Id.eq(user.id))
            .filter(user::Column::CompanyId.eq(user.company_id))
            .exec(self.db.as_ref())
            .await
            .map_err(RepositoryError::from_write)?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.find_by_id(user.company_id, user.id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn bump_token_version(&self, company_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        let result = user::Entity::update_many()
            .col_expr(
                user::Column::TokenVersion,
                Expr::col(user::Column::TokenVersion).add(1),
            )
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::CompanyId.eq(company_id))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn touch_last_seen(
        &self,
        company_id: Uuid,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        user::Entity::update_many()
            .col_expr(user::Column::LastSeenAt, Expr::value(Some(at)))
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::CompanyId.eq(company_id))
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn count(&self, company_id: Uuid) -> Result<u64, RepositoryError> {
        let count = user::Entity::find()
            .filter(user::Column::CompanyId.eq(company_id))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }

    async fn set_queues(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        queue_ids: &[Uuid],
    ) -> Result<(), RepositoryError> {
        let mut unique = queue_ids.to_vec();
        unique.sort();
        unique.dedup();

        let txn = self.db.begin().await?;

        user_queue::Entity::delete_many()
            .filter(user_queue::Column::UserId.eq(user_id))
            .filter(user_queue::Column::CompanyId.eq(company_id))
            .exec(&txn)
            .await?;

        if !unique.is_empty() {
            let rows = unique.into_iter().map(|queue_id| user_queue::ActiveModel {
                user_id: Set(user_id),
                queue_id: Set(queue_id),
                company_id: Set(company_id),
            });
            user_queue::Entity::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    async fn queue_ids(&self, company_id: Uuid, user_id: Uuid) -> Result<Vec<Uuid>, RepositoryError> {
        let ids: Vec<Uuid> = user_queue::Entity::find()
            .select_only()
            .column(user_queue::Column::QueueId)
            .filter(user_queue::Column::UserId.eq(user_id))
            .filter(user_queue::Column::CompanyId.eq(company_id))
            .into_tuple()
            .all(self.db.as_ref())
            .await?;
        Ok(ids)
    }

    async fn is_queue_member(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        queue_id: Uuid,
    ) -> Result<bool, RepositoryError> {
        let count = user_queue::Entity::find()
            .filter(user_queue::Column::UserId.eq(user_id))
            .filter(user_queue::Column::QueueId.eq(queue_id))
            .filter(user_queue::Column::CompanyId.eq(company_id))
            .count(self.db.as_ref())
            .await?;
        Ok(count > 0)
    }
}
