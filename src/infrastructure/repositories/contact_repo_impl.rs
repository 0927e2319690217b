// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::contact::Contact;
use crate::domain::repositories::contact_repository::ContactRepository;
use crate::infrastructure::database::entities::contact;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 联系人仓库实现
#[derive(Clone)]
pub struct ContactRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ContactRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<contact::Model> for Contact {
    fn from(model: contact::Model) -> Self {
        Self {
            id: model.id,
            company_id: model.company_id,
            name: model.name,
            number: model.number,
            email: model.email,
            is_group: model.is_group,
            ixc_id: model.ixc_id,
            cpf: model.cpf,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl ContactRepository for ContactRepositoryImpl {
    async fn create(&self, contact: &Contact) -> Result<Contact, RepositoryError> {
        let model = contact::ActiveModel {
            id: Set(contact.id),
            company_id: Set(contact.company_id),
            name: Set(contact.name.clone()),
            number: Set(contact.number.clone()),
            email: Set(contact.email.clone()),
            is_group: Set(contact.is_group),
            ixc_id: Set(contact.ixc_id.clone()),
            cpf: Set(contact.cpf.clone()),
            created_at: Set(contact.created_at),
            updated_at: Set(contact.updated_at),
        };
        let inserted = model
            .insert(self.db.as_ref())
            .await
            .map_err(RepositoryError::from_write)?;
        Ok(inserted.into())
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Option<Contact>, RepositoryError> {
        let model = contact::Entity::find_by_id(id)
            .filter(contact::Column::CompanyId.eq(company_id))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_number(
        &self,
        company_id: Uuid,
        number: &str,
    ) -> Result<Option<Contact>, RepositoryError> {
        let model = contact::Entity::find()
            .filter(contact::Column::CompanyId.eq(company_id))
            .filter(contact::Column::Number.eq(number))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, company_id: Uuid) -> Result<Vec<Contact>, RepositoryError> {
        let models = contact::Entity::find()
            .filter(contact::Column::CompanyId.eq(company_id))
            .order_by_asc(contact::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}
