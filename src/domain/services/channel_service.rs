// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

/// 发往外部通道的消息
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub company_id: Uuid,
    pub connection_id: Option<Uuid>,
    pub ticket_id: Uuid,
    /// 联系人通道地址
    pub number: String,
    pub is_group: bool,
    pub body: String,
    pub quoted_msg_id: Option<String>,
}

/// 通道适配器特质
///
/// 由外部网关（WhatsApp 等）实现，内部备注永远不会经过这里
#[async_trait]
pub trait ChannelService: Send + Sync {
    /// 发送消息
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 通道返回的送达ID
    /// * `Err(anyhow::Error)` - 发送失败
    async fn send_message(&self, message: &OutboundMessage) -> Result<String>;
}
