// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::schedule::{Schedule, ScheduleStatus};
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 定时发送仓库特质
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn create(&self, schedule: &Schedule) -> Result<Schedule, RepositoryError>;
    async fn list_for_ticket(
        &self,
        company_id: Uuid,
        ticket_id: Uuid,
    ) -> Result<Vec<Schedule>, RepositoryError>;
    /// 删除待发送的任务，返回是否删除了记录
    async fn delete_pending(&self, company_id: Uuid, id: Uuid) -> Result<bool, RepositoryError>;
    /// 后台任务路径：到期的待发送任务
    async fn find_due(&self, now: DateTime<Utc>, limit: u64) -> Result<Vec<Schedule>, RepositoryError>;
    /// 条件更新 pending → processing，返回是否由本次调用认领
    async fn claim(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, RepositoryError>;
    /// 从 processing 切换到终态，返回是否由本次调用完成切换
    async fn finish(
        &self,
        id: Uuid,
        status: ScheduleStatus,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError>;
}
