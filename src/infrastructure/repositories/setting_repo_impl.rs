// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::setting::Setting;
use crate::domain::repositories::setting_repository::SettingRepository;
use crate::infrastructure::database::entities::setting;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 设置仓库实现
#[derive(Clone)]
pub struct SettingRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl SettingRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<setting::Model> for Setting {
    fn from(model: setting::Model) -> Self {
        Self {
            id: model.id,
            company_id: model.company_id,
            key: model.key,
            value: model.value,
            updated_at: model.updated_at,
        }
    }
}

fn scope(company_id: Option<Uuid>) -> Condition {
    match company_id {
        Some(id) => Condition::all().add(setting::Column::CompanyId.eq(id)),
        None => Condition::all().add(setting::Column::CompanyId.is_null()),
    }
}

#[async_trait]
impl SettingRepository for SettingRepositoryImpl {
    async fn list_for_company(&self, company_id: Uuid) -> Result<Vec<Setting>, RepositoryError> {
        let models = setting::Entity::find()
            .filter(
                Condition::any()
                    .add(setting::Column::CompanyId.eq(company_id))
                    .add(setting::Column::CompanyId.is_null()),
            )
            .order_by_asc(setting::Column::Key)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn upsert(
        &self,
        company_id: Option<Uuid>,
        key: &str,
        value: &str,
    ) -> Result<Setting, RepositoryError> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let existing = setting::Entity::find()
            .filter(scope(company_id))
            .filter(setting::Column::Key.eq(key))
            .one(&txn)
            .await?;

        let saved = match existing {
            Some(model) => {
                let mut active: setting::ActiveModel = model.into();
                active.value = Set(value.to_string());
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
            None => {
                setting::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    company_id: Set(company_id),
                    key: Set(key.to_string()),
                    value: Set(value.to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;
        Ok(saved.into())
    }
}
