// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::{DomainError, EntityKind};
use crate::domain::models::plan::Resource;
use crate::domain::models::user::{normalize_email, AuthUser, Profile, User};
use crate::domain::repositories::queue_repository::QueueRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::password_service::PasswordService;
use crate::domain::services::plan_service::PlanService;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

const EMAIL_TAKEN: &str = "ERR_EMAIL_ALREADY_EXISTS";

/// 坐席及其所属队列
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    #[serde(flatten)]
    pub user: User,
    pub queue_ids: Vec<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile: Profile,
    pub queue_ids: Vec<Uuid>,
}

/// 修改坐席，`None` 表示不修改
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub profile: Option<Profile>,
    pub active: Option<bool>,
    pub queue_ids: Option<Vec<Uuid>>,
}

/// 坐席管理服务
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    queue_repo: Arc<dyn QueueRepository>,
    plan_service: Arc<PlanService>,
    passwords: PasswordService,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        queue_repo: Arc<dyn QueueRepository>,
        plan_service: Arc<PlanService>,
        passwords: PasswordService,
    ) -> Self {
        Self {
            user_repo,
            queue_repo,
            plan_service,
            passwords,
        }
    }

    /// 创建坐席
    ///
    /// 依次检查管理员权限、套餐容量、邮箱唯一性和队列归属
    pub async fn create_user(
        &self,
        acting: &AuthUser,
        input: NewUserInput,
    ) -> Result<UserDetails, DomainError> {
        acting.authorize(Profile::Admin)?;
        let company_id = acting.company_id;

        self.plan_service
            .check_capacity(company_id, Resource::Users)
            .await?;

        let email = normalize_email(&input.email);
        if self.user_repo.find_by_email(company_id, &email).await?.is_some() {
            return Err(DomainError::AlreadyExists(EMAIL_TAKEN));
        }
        self.ensure_queues_exist(company_id, &input.queue_ids).await?;

        let password_hash = self.passwords.hash(&input.password).await?;
        let user = User::new(company_id, input.name, email, password_hash, input.profile);
        let user = match self.plan_service.cap_for(company_id, Resource::Users).await? {
            Some(cap) => self
                .user_repo
                .create_capped(&user, cap)
                .await?
                .ok_or(DomainError::PlanLimitExceeded(Resource::Users))?,
            None => self.user_repo.create(&user).await?,
        };
        self.user_repo
            .set_queues(company_id, user.id, &input.queue_ids)
            .await?;

        info!(company_id = %company_id, user_id = %user.id, "User created");
        Ok(UserDetails {
            user,
            queue_ids: input.queue_ids,
        })
    }

    /// 修改坐席
    ///
    /// 管理员可以修改同公司的任何坐席；普通用户只能修改自己的姓名和密码。
    /// 停用或修改密码会使该坐席的已有会话全部失效。
    pub async fn update_user(
        &self,
        acting: &AuthUser,
        id: Uuid,
        update: UserUpdate,
    ) -> Result<UserDetails, DomainError> {
        let is_admin = acting.authorize(Profile::Admin).is_ok();
        let touches_privileges =
            update.profile.is_some() || update.active.is_some() || update.queue_ids.is_some();
        if !is_admin && (acting.id != id || touches_privileges) {
            return Err(DomainError::InsufficientProfile);
        }

        let company_id = acting.company_id;
        let mut user = self
            .user_repo
            .find_by_id(company_id, id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::User))?;

        let mut revoke_sessions = false;

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            let email = normalize_email(&email);
            if email != user.email {
                if self.user_repo.find_by_email(company_id, &email).await?.is_some() {
                    return Err(DomainError::AlreadyExists(EMAIL_TAKEN));
                }
                user.email = email;
            }
        }
        if let Some(profile) = update.profile {
            user.profile = profile;
        }
        if let Some(active) = update.active {
            revoke_sessions |= user.active && !active;
            user.active = active;
        }
        if let Some(password) = update.password {
            user.password_hash = self.passwords.hash(&password).await?;
            revoke_sessions = true;
        }
        if let Some(queue_ids) = &update.queue_ids {
            self.ensure_queues_exist(company_id, queue_ids).await?;
        }

        user.updated_at = Utc::now();
        let mut user = self.user_repo.update(&user).await?;

        if let Some(queue_ids) = &update.queue_ids {
            self.user_repo.set_queues(company_id, id, queue_ids).await?;
        }
        if revoke_sessions {
            self.user_repo.bump_token_version(company_id, id).await?;
            user.token_version += 1;
            info!(user_id = %id, "User sessions revoked after credential change");
        }

        let queue_ids = self.user_repo.queue_ids(company_id, id).await?;
        Ok(UserDetails { user, queue_ids })
    }

    pub async fn list_users(&self, acting: &AuthUser) -> Result<Vec<UserDetails>, DomainError> {
        let users = self.user_repo.list(acting.company_id).await?;
        let mut details = Vec::with_capacity(users.len());
        for user in users {
            let queue_ids = self.user_repo.queue_ids(acting.company_id, user.id).await?;
            details.push(UserDetails { user, queue_ids });
        }
        Ok(details)
    }

    pub async fn get_user(&self, acting: &AuthUser, id: Uuid) -> Result<UserDetails, DomainError> {
        let user = self
            .user_repo
            .find_by_id(acting.company_id, id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::User))?;
        let queue_ids = self.user_repo.queue_ids(acting.company_id, id).await?;
        Ok(UserDetails { user, queue_ids })
    }

    async fn ensure_queues_exist(&self, company_id: Uuid, queue_ids: &[Uuid]) -> Result<(), DomainError> {
        if queue_ids.is_empty() {
            return Ok(());
        }
        let mut unique = queue_ids.to_vec();
        unique.sort();
        unique.dedup();
        let found = self.queue_repo.find_many(company_id, &unique).await?;
        if found.len() != unique.len() {
            return Err(DomainError::NotFound(EntityKind::Queue));
        }
        Ok(())
    }
}
