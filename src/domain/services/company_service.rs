// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::{DomainError, EntityKind};
use crate::domain::models::company::Company;
use crate::domain::models::user::{AuthUser, Profile, User};
use crate::domain::repositories::company_repository::CompanyRepository;
use crate::domain::repositories::plan_repository::PlanRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::password_service::PasswordService;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 新建公司参数，同时创建公司的第一个管理员
#[derive(Debug, Clone)]
pub struct CompanySignup {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub plan_id: Uuid,
    pub due_date: Option<DateTime<Utc>>,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_password: String,
}

/// 公司服务
pub struct CompanyService {
    company_repo: Arc<dyn CompanyRepository>,
    plan_repo: Arc<dyn PlanRepository>,
    user_repo: Arc<dyn UserRepository>,
    passwords: PasswordService,
}

impl CompanyService {
    pub fn new(
        company_repo: Arc<dyn CompanyRepository>,
        plan_repo: Arc<dyn PlanRepository>,
        user_repo: Arc<dyn UserRepository>,
        passwords: PasswordService,
    ) -> Self {
        Self {
            company_repo,
            plan_repo,
            user_repo,
            passwords,
        }
    }

    /// 创建公司及其管理员（仅超级管理员）
    pub async fn create_company(
        &self,
        acting: &AuthUser,
        signup: CompanySignup,
    ) -> Result<(Company, User), DomainError> {
        acting.authorize_super_admin()?;
        if self.plan_repo.find_by_id(signup.plan_id).await?.is_none() {
            return Err(DomainError::NotFound(EntityKind::Plan));
        }

        let password_hash = self.passwords.hash(&signup.admin_password).await?;

        let mut company = Company::new(signup.name, signup.plan_id, signup.due_date);
        company.email = signup.email;
        company.phone = signup.phone;
        let company = self.company_repo.create(&company).await?;

        let admin = User::new(
            company.id,
            signup.admin_name,
            signup.admin_email,
            password_hash,
            Profile::Admin,
        );
        let admin = self.user_repo.create(&admin).await?;

        info!(company_id = %company.id, admin_id = %admin.id, "Company created");
        Ok((company, admin))
    }

    /// 查看公司：普通用户只能查看自己的公司
    pub async fn show_company(&self, acting: &AuthUser, id: Uuid) -> Result<Company, DomainError> {
        if id != acting.company_id && !acting.super_admin {
            return Err(DomainError::ForbiddenTenant);
        }
        self.company_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::Company))
    }

    pub async fn list_companies(&self, acting: &AuthUser) -> Result<Vec<Company>, DomainError> {
        acting.authorize_super_admin()?;
        Ok(self.company_repo.list().await?)
    }
}
