// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::payment_gateway::{CheckoutRequest, PaymentGateway};
use crate::utils::signature::{self, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct CheckoutSession {
    url: String,
}

/// 支付网关客户端
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    checkout_url: String,
    secret: String,
}

impl HttpPaymentGateway {
    pub fn new(checkout_url: String, secret: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();

        Self {
            client,
            checkout_url,
            secret,
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_checkout_session(&self, request: &CheckoutRequest) -> Result<String> {
        let timestamp = chrono::Utc::now().timestamp();
        let payload = serde_json::to_vec(request)?;
        let signature = signature::sign(&self.secret, timestamp, &payload);

        let response = self
            .client
            .post(&self.checkout_url)
            .header("Content-Type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .header(TIMESTAMP_HEADER, timestamp.to_string())
            .body(payload)
            .send()
            .await
            .context("Failed to reach payment gateway")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Payment gateway returned {}: {}", status, body));
        }

        let session: CheckoutSession = response
            .json()
            .await
            .context("Failed to parse payment gateway response")?;
        Ok(session.url)
    }
}
