// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 对话角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// 历史对话中的一轮
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// AI 服务特质
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// 根据系统提示词和对话历史生成回复
    ///
    /// # 参数
    ///
    /// * `prompt` - 客户最新的消息
    /// * `history` - 之前的公开消息，按时间正序
    /// * `system_prompt` - 租户配置的系统提示词
    async fn complete(&self, prompt: &str, history: &[ChatTurn], system_prompt: &str)
        -> Result<String>;
}
