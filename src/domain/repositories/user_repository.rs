// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::user::User;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 坐席仓库特质
///
/// 同时维护坐席与队列的成员关系
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, RepositoryError>;
    /// 在同一事务内计数并插入，公司已有 `cap` 个坐席时返回 `None`
    async fn create_capped(&self, user: &User, cap: u64) -> Result<Option<User>, RepositoryError>;
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Option<User>, RepositoryError>;
    /// 登录路径：按邮箱跨公司查找
    async fn find_by_email_any_company(&self, email: &str) -> Result<Vec<User>, RepositoryError>;
    async fn find_by_email(
        &self,
        company_id: Uuid,
        email: &str,
    ) -> Result<Option<User>, RepositoryError>;
    async fn list(&self, company_id: Uuid) -> Result<Vec<User>, RepositoryError>;
    async fn update(&self, user: &User) -> Result<User, RepositoryError>;
    /// 递增令牌版本，使已签发的令牌全部失效
    async fn bump_token_version(&self, company_id: Uuid, id: Uuid) -> Result<bool, RepositoryError>;
    async fn touch_last_seen(
        &self,
        company_id: Uuid,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;
    async fn count(&self, company_id: Uuid) -> Result<u64, RepositoryError>;
    /// 替换坐席的队列成员关系
    async fn set_queues(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        queue_ids: &[Uuid],
    ) -> Result<(), RepositoryError>;
    async fn queue_ids(&self, company_id: Uuid, user_id: Uuid) -> Result<Vec<Uuid>, RepositoryError>;
    async fn is_queue_member(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        queue_id: Uuid,
    ) -> Result<bool, RepositoryError>;
}
