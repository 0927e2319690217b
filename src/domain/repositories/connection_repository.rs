// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::connection::{Connection, ConnectionStatus};
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 通道连接仓库特质
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    async fn create(&self, connection: &Connection) -> Result<Connection, RepositoryError>;
    /// 在同一事务内计数并插入，公司已有 `cap` 个连接时返回 `None`
    async fn create_capped(
        &self,
        connection: &Connection,
        cap: u64,
    ) -> Result<Option<Connection>, RepositoryError>;
    async fn find_by_id(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Connection>, RepositoryError>;
    /// 通道回调路径：连接本身决定租户
    async fn find_for_channel(&self, id: Uuid) -> Result<Option<Connection>, RepositoryError>;
    async fn find_default(&self, company_id: Uuid) -> Result<Option<Connection>, RepositoryError>;
    async fn list(&self, company_id: Uuid) -> Result<Vec<Connection>, RepositoryError>;
    async fn count(&self, company_id: Uuid) -> Result<u64, RepositoryError>;
    async fn update_status(
        &self,
        company_id: Uuid,
        id: Uuid,
        status: ConnectionStatus,
    ) -> Result<(), RepositoryError>;
}
