// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::company::Company;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 公司仓库特质
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn create(&self, company: &Company) -> Result<Company, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, RepositoryError>;
    async fn list(&self) -> Result<Vec<Company>, RepositoryError>;
    /// 更新启用状态和到期时间
    async fn update_billing(
        &self,
        id: Uuid,
        status: bool,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<(), RepositoryError>;
    /// 冻结到期时间早于 `cutoff` 的启用公司，返回被冻结的公司ID
    async fn block_overdue(&self, cutoff: DateTime<Utc>) -> Result<Vec<Uuid>, RepositoryError>;
}
