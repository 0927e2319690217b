// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::success;
use crate::application::dto::billing_request::CreateInvoiceRequestDto;
use crate::application::dto::company_request::CreateCompanyRequestDto;
use crate::domain::services::billing_service::BillingService;
use crate::domain::services::company_service::CompanyService;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::CurrentUser;

pub async fn list_companies(
    Extension(companies): Extension<Arc<CompanyService>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    Ok(success(companies.list_companies(&user).await?))
}

/// 创建公司及其首个管理员
pub async fn create_company(
    Extension(companies): Extension<Arc<CompanyService>>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateCompanyRequestDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload.validate()?;
    let (company, admin) = companies.create_company(&user, payload.into()).await?;
    Ok((
        StatusCode::CREATED,
        success(json!({
            "company": company,
            "admin": admin,
        })),
    ))
}

pub async fn show_company(
    Extension(companies): Extension<Arc<CompanyService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    Ok(success(companies.show_company(&user, id).await?))
}

/// 为指定公司开具账单
pub async fn create_invoice(
    Extension(billing): Extension<Arc<BillingService>>,
    CurrentUser(user): CurrentUser,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<CreateInvoiceRequestDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload.validate()?;
    let invoice = billing
        .create_invoice(
            &user,
            company_id,
            payload.detail,
            payload.value_cents,
            payload.due_date,
        )
        .await?;
    Ok((StatusCode::CREATED, success(invoice)))
}
