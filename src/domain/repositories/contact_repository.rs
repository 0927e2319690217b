// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::contact::Contact;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 联系人仓库特质
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, contact: &Contact) -> Result<Contact, RepositoryError>;
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Option<Contact>, RepositoryError>;
    async fn find_by_number(
        &self,
        company_id: Uuid,
        number: &str,
    ) -> Result<Option<Contact>, RepositoryError>;
    async fn list(&self, company_id: Uuid) -> Result<Vec<Contact>, RepositoryError>;
}
