// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use crate::domain::models::setting::{validate_value, Setting, TenantSettings};
use crate::domain::models::user::{AuthUser, Profile};
use crate::domain::repositories::setting_repository::SettingRepository;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 设置存储
///
/// 自动化决策点只通过这里加载一次快照，不在流程中途零散查询设置表
pub struct SettingsStore {
    repo: Arc<dyn SettingRepository>,
}

impl SettingsStore {
    pub fn new(repo: Arc<dyn SettingRepository>) -> Self {
        Self { repo }
    }

    /// 加载租户设置快照
    pub async fn load(&self, company_id: Uuid) -> Result<TenantSettings, DomainError> {
        let rows = self.repo.list_for_company(company_id).await?;
        Ok(TenantSettings::from_rows(rows))
    }

    pub async fn list(&self, acting: &AuthUser) -> Result<Vec<Setting>, DomainError> {
        acting.authorize(Profile::Admin)?;
        Ok(self.repo.list_for_company(acting.company_id).await?)
    }

    /// 写入公司级设置
    pub async fn upsert(&self, acting: &AuthUser, key: &str, value: &str) -> Result<Setting, DomainError> {
        acting.authorize(Profile::Admin)?;
        if key.trim().is_empty() {
            return Err(DomainError::Validation("setting key is required".to_string()));
        }
        validate_value(key, value).map_err(DomainError::Validation)?;
        let setting = self.repo.upsert(Some(acting.company_id), key, value).await?;
        info!(company_id = %acting.company_id, key = %key, "Setting updated");
        Ok(setting)
    }
}
