// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use crate::domain::models::contact::{ChannelAddress, Contact};
use crate::domain::models::user::AuthUser;
use crate::domain::repositories::contact_repository::ContactRepository;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct ContactInput {
    pub name: String,
    pub number: String,
    pub email: Option<String>,
    pub ixc_id: Option<String>,
    pub cpf: Option<String>,
}

/// 联系人服务
pub struct ContactService {
    contact_repo: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(contact_repo: Arc<dyn ContactRepository>) -> Self {
        Self { contact_repo }
    }

    pub async fn list_contacts(&self, acting: &AuthUser) -> Result<Vec<Contact>, DomainError> {
        Ok(self.contact_repo.list(acting.company_id).await?)
    }

    /// 创建联系人，同一公司内号码唯一
    pub async fn create_contact(&self, acting: &AuthUser, input: ContactInput) -> Result<Contact, DomainError> {
        let address = ChannelAddress::parse(&input.number)?;
        if self
            .contact_repo
            .find_by_number(acting.company_id, &address.number)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyExists("ERR_CONTACT_ALREADY_EXISTS"));
        }

        let mut contact = Contact::new(acting.company_id, input.name, &address);
        contact.email = input.email;
        contact.ixc_id = input.ixc_id;
        contact.cpf = input.cpf;
        let contact = self.contact_repo.create(&contact).await?;
        info!(company_id = %contact.company_id, contact_id = %contact.id, "Contact created");
        Ok(contact)
    }

    /// 通道路径：按号码查找或创建联系人
    pub async fn find_or_create(
        &self,
        company_id: Uuid,
        address: &ChannelAddress,
        name: Option<String>,
    ) -> Result<Contact, DomainError> {
        if let Some(contact) = self
            .contact_repo
            .find_by_number(company_id, &address.number)
            .await?
        {
            return Ok(contact);
        }

        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| address.number.clone());
        let contact = self
            .contact_repo
            .create(&Contact::new(company_id, name, address))
            .await?;
        info!(company_id = %company_id, contact_id = %contact.id, "Contact created from channel");
        Ok(contact)
    }
}
