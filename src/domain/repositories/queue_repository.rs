// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::queue::Queue;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 队列仓库特质
#[async_trait]
pub trait QueueRepository: Send + Sync {
    async fn create(&self, queue: &Queue) -> Result<Queue, RepositoryError>;
    /// 在同一事务内计数并插入，公司已有 `cap` 个队列时返回 `None`
    async fn create_capped(&self, queue: &Queue, cap: u64) -> Result<Option<Queue>, RepositoryError>;
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Option<Queue>, RepositoryError>;
    /// 查找属于该公司的队列，不存在或不属于该公司的ID会被忽略
    async fn find_many(&self, company_id: Uuid, ids: &[Uuid]) -> Result<Vec<Queue>, RepositoryError>;
    async fn list(&self, company_id: Uuid) -> Result<Vec<Queue>, RepositoryError>;
    async fn update(&self, queue: &Queue) -> Result<Queue, RepositoryError>;
    /// 在同一事务中解除工单和成员关系后删除队列
    ///
    /// 队列中的工单 `queue_id` 置空，未结束且无坐席的工单回到待分配；
    /// 消息记录不受影响。返回是否删除了队列。
    async fn delete_detaching(&self, company_id: Uuid, id: Uuid) -> Result<bool, RepositoryError>;
    async fn count(&self, company_id: Uuid) -> Result<u64, RepositoryError>;
}
