// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use super::success;
use crate::application::dto::billing_request::{CheckoutRequestDto, PaymentWebhookDto};
use crate::domain::services::billing_service::BillingService;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::CurrentUser;

/// 支付网关确认付款的状态值
const PAID_STATUS: &str = "paid";

pub async fn list_invoices(
    Extension(billing): Extension<Arc<BillingService>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    Ok(success(billing.list_invoices(&user).await?))
}

/// 创建支付会话，返回跳转地址
pub async fn create_checkout(
    Extension(billing): Extension<Arc<BillingService>>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CheckoutRequestDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload.validate()?;
    let session = billing
        .create_checkout(&user, payload.plan_id, payload.method)
        .await?;
    Ok((StatusCode::CREATED, success(session)))
}

/// 支付网关回调
///
/// 签名已由中间件校验；只有 `paid` 状态会确认账单，其余状态直接确认收到
pub async fn payment_webhook(
    Extension(billing): Extension<Arc<BillingService>>,
    Json(payload): Json<PaymentWebhookDto>,
) -> Result<Json<Value>, AppError> {
    if payload.status != PAID_STATUS {
        debug!(invoice_id = %payload.invoice_id, status = %payload.status, "Payment event ignored");
        return Ok(success(Value::Null));
    }
    let invoice = billing
        .confirm_payment(payload.company_id, payload.invoice_id)
        .await?;
    Ok(success(invoice))
}
