// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use ispdesk::domain::services::ai_service::{AiProvider, ChatTurn};
use ispdesk::domain::services::channel_service::{ChannelService, OutboundMessage};
use ispdesk::domain::services::payment_gateway::{CheckoutRequest, PaymentGateway};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// 记录外发消息的通道替身
#[derive(Default)]
pub struct FakeChannel {
    pub sent: Mutex<Vec<OutboundMessage>>,
    pub fail: AtomicBool,
    counter: AtomicUsize,
}

impl FakeChannel {
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn bodies(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|m| m.body.clone())
            .collect()
    }
}

#[async_trait]
impl ChannelService for FakeChannel {
    async fn send_message(&self, message: &OutboundMessage) -> anyhow::Result<String> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("gateway unavailable");
        }
        self.sent.lock().unwrap().push(message.clone());
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(format!("wamid.{}", n))
    }
}

/// 返回固定回复的 AI 替身，`reply` 为空时模拟调用失败
#[derive(Default)]
pub struct FakeAi {
    pub reply: Mutex<Option<String>>,
    pub calls: AtomicUsize,
    pub last_history: Mutex<Vec<ChatTurn>>,
}

impl FakeAi {
    pub fn answer_with(&self, reply: &str) {
        *self.reply.lock().unwrap() = Some(reply.to_string());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AiProvider for FakeAi {
    async fn complete(
        &self,
        _prompt: &str,
        history: &[ChatTurn],
        _system_prompt: &str,
    ) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_history.lock().unwrap() = history.to_vec();
        match self.reply.lock().unwrap().clone() {
            Some(reply) => Ok(reply),
            None => anyhow::bail!("provider timeout"),
        }
    }
}

/// 支付网关替身
#[derive(Default)]
pub struct FakeGateway {
    pub requests: Mutex<Vec<CheckoutRequest>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_checkout_session(&self, request: &CheckoutRequest) -> anyhow::Result<String> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("gateway returned 503");
        }
        self.requests.lock().unwrap().push(request.clone());
        Ok(format!("https://pay.example.test/{}", request.invoice_id))
    }
}
