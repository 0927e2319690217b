// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::ai_service::{AiProvider, ChatTurn};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

/// OpenAI 兼容的对话补全客户端
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: Option<String>, model: String, api_base_url: String, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            model,
            api_base_url,
        }
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    /// 组装系统提示词、历史消息和最新消息，调用 `/chat/completions`
    ///
    /// # 错误
    /// * 当 API 密钥未配置时返回错误
    /// * 当服务返回非 2xx 或响应格式不符时返回错误
    async fn complete(&self, prompt: &str, history: &[ChatTurn], system_prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| anyhow!("AI API key not configured"))?;

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(json!({ "role": "system", "content": system_prompt }));
        for turn in history {
            messages.push(json!({ "role": turn.role, "content": turn.content }));
        }
        messages.push(json!({ "role": "user", "content": prompt }));

        let request_body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": 0.3
        });

        let url = format!("{}/chat/completions", self.api_base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request_body)
            .send()
            .await
            .context("Failed to send request to AI API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("AI API returned error: {} - {}", status, error_text));
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse AI API response")?;

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(|content| content.trim().to_string())
            .ok_or_else(|| anyhow!("Invalid response format from AI API"))
    }
}
