// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

/// 支付会话请求
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub company_id: Uuid,
    pub plan_id: Uuid,
    pub invoice_id: Uuid,
    pub amount_cents: i64,
    /// 支付方式，例如 `card`、`pix`、`boleto`
    pub method: String,
    pub description: String,
}

/// 支付网关特质
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// 创建支付会话，返回跳转地址
    async fn create_checkout_session(&self, request: &CheckoutRequest) -> Result<String>;
}
