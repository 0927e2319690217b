// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// 创建支付会话请求DTO
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequestDto {
    /// 缺省时使用公司当前套餐
    pub plan_id: Option<Uuid>,
    #[validate(length(min = 1, max = 32))]
    pub method: String,
}

/// 开具账单请求DTO
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequestDto {
    #[validate(length(min = 1, max = 255))]
    pub detail: String,
    #[validate(range(min = 0))]
    pub value_cents: i64,
    pub due_date: DateTime<Utc>,
}

/// 支付网关回调
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentWebhookDto {
    pub company_id: Uuid,
    pub invoice_id: Uuid,
    /// 只处理 `paid`
    pub status: String,
}
