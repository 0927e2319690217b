// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::plan::Plan;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 套餐仓库特质
///
/// 套餐是平台级数据，不属于任何租户
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn create(&self, plan: &Plan) -> Result<Plan, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Plan>, RepositoryError>;
    async fn list(&self) -> Result<Vec<Plan>, RepositoryError>;
    async fn update(&self, plan: &Plan) -> Result<Plan, RepositoryError>;
    /// 删除套餐，返回是否删除了记录
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
    /// 引用该套餐的公司数量
    async fn count_companies(&self, plan_id: Uuid) -> Result<u64, RepositoryError>;
}
