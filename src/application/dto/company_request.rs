// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::company_service::CompanySignup;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// 开通公司请求DTO，同时创建第一个管理员
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyRequestDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub plan_id: Uuid,
    pub due_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 255))]
    pub admin_name: String,
    #[validate(email)]
    pub admin_email: String,
    #[validate(length(min = 6, max = 128))]
    pub admin_password: String,
}

impl From<CreateCompanyRequestDto> for CompanySignup {
    fn from(dto: CreateCompanyRequestDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            phone: dto.phone,
            plan_id: dto.plan_id,
            due_date: dto.due_date,
            admin_name: dto.admin_name,
            admin_email: dto.admin_email,
            admin_password: dto.admin_password,
        }
    }
}
