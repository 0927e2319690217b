// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::ticket::{Ticket, TicketFilter, TicketTransition};
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 工单仓库特质
#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn create(&self, ticket: &Ticket) -> Result<Ticket, RepositoryError>;
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Option<Ticket>, RepositoryError>;
    /// 工单所属公司，仅用于区分“不存在”和“属于其他租户”
    async fn owner_of(&self, id: Uuid) -> Result<Option<Uuid>, RepositoryError>;
    /// 联系人在某个连接上最近的工单（任意状态）
    async fn find_latest_for_contact(
        &self,
        company_id: Uuid,
        contact_id: Uuid,
        whatsapp_id: Option<Uuid>,
    ) -> Result<Option<Ticket>, RepositoryError>;
    /// 联系人最近的未结束工单
    async fn find_active_for_contact(
        &self,
        company_id: Uuid,
        contact_id: Uuid,
    ) -> Result<Option<Ticket>, RepositoryError>;
    async fn list(&self, company_id: Uuid, filter: &TicketFilter) -> Result<Vec<Ticket>, RepositoryError>;
    /// 以 `transition.from` 为条件执行原子更新
    ///
    /// 返回 `false` 表示工单已被并发修改，未做任何变更
    async fn apply_transition(
        &self,
        transition: &TicketTransition,
        now: DateTime<Utc>,
    ) -> Result<bool, RepositoryError>;
    async fn update_preview(
        &self,
        company_id: Uuid,
        id: Uuid,
        preview: &str,
        now: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;
}
