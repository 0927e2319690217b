// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::invoice::Invoice;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 账单仓库特质
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn create(&self, invoice: &Invoice) -> Result<Invoice, RepositoryError>;
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Option<Invoice>, RepositoryError>;
    async fn list(&self, company_id: Uuid) -> Result<Vec<Invoice>, RepositoryError>;
    /// 标记已支付，已支付的账单不受影响；返回是否发生了变更
    async fn mark_paid(
        &self,
        company_id: Uuid,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError>;
    /// 将到期未付的账单标记为逾期，返回受影响行数
    async fn mark_overdue(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError>;
}
