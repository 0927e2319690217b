// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::channel_service::{ChannelService, OutboundMessage};
use crate::utils::signature::{self, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct DeliveryReceipt {
    id: String,
}

/// 通道网关客户端
///
/// 外发消息以 JSON 形式 POST 到网关，请求体用共享密钥签名，
/// 网关返回 `{"id": "<送达ID>"}`
pub struct HttpChannelService {
    /// HTTP 客户端
    client: reqwest::Client,
    gateway_url: String,
    /// 签名密钥
    secret: String,
}

impl HttpChannelService {
    pub fn new(gateway_url: String, secret: String, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            gateway_url,
            secret,
        }
    }
}

#[async_trait]
impl ChannelService for HttpChannelService {
    async fn send_message(&self, message: &OutboundMessage) -> Result<String> {
        let timestamp = chrono::Utc::now().timestamp();
        let payload = serde_json::to_vec(message)?;
        let signature = signature::sign(&self.secret, timestamp, &payload);

        let response = self
            .client
            .post(&self.gateway_url)
            .header("Content-Type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .header(TIMESTAMP_HEADER, timestamp.to_string())
            .body(payload)
            .send()
            .await
            .context("Failed to reach channel gateway")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Channel gateway rejected message with status {}: {}",
                status,
                body
            ));
        }

        let receipt: DeliveryReceipt = response
            .json()
            .await
            .context("Failed to parse channel gateway response")?;
        Ok(receipt.id)
    }
}
