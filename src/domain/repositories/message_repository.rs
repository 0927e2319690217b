// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::message::{AckLevel, Message};
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 消息仓库特质
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// 追加消息；同一公司内 ID 已存在时不写入并返回 `false`
    async fn append(&self, message: &Message) -> Result<bool, RepositoryError>;
    async fn find_by_id(&self, company_id: Uuid, id: &str) -> Result<Option<Message>, RepositoryError>;
    /// 通道回调路径：按送达ID查找外发消息，`company_id` 已知时限定在该公司内
    async fn find_for_channel(
        &self,
        company_id: Option<Uuid>,
        id: &str,
    ) -> Result<Option<Message>, RepositoryError>;
    /// 按时间正序列出工单的全部消息
    async fn list_for_ticket(&self, company_id: Uuid, ticket_id: Uuid) -> Result<Vec<Message>, RepositoryError>;
    /// 最近 `limit` 条公开消息，按时间正序返回
    async fn recent_public(
        &self,
        company_id: Uuid,
        ticket_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Message>, RepositoryError>;
    /// 单调更新外发消息的送达确认：仅当新级别高于已存级别时写入
    async fn update_ack(
        &self,
        company_id: Option<Uuid>,
        id: &str,
        ack: AckLevel,
    ) -> Result<bool, RepositoryError>;
    async fn mark_ticket_read(&self, company_id: Uuid, ticket_id: Uuid) -> Result<u64, RepositoryError>;
}
