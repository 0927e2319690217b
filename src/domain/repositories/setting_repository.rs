// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::setting::Setting;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 设置仓库特质
#[async_trait]
pub trait SettingRepository: Send + Sync {
    /// 公司级设置和全局设置
    async fn list_for_company(&self, company_id: Uuid) -> Result<Vec<Setting>, RepositoryError>;
    /// 写入公司级设置，`company_id` 为空时写入全局设置
    async fn upsert(
        &self,
        company_id: Option<Uuid>,
        key: &str,
        value: &str,
    ) -> Result<Setting, RepositoryError>;
}
