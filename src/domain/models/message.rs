// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 消息送达确认级别，只能单调递增
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(into = "i32", try_from = "i32")]
pub enum AckLevel {
    /// 尚未发出
    #[default]
    Pending = 0,
    /// 服务器已接收
    Sent = 1,
    /// 已送达设备
    Delivered = 2,
    /// 已读
    Read = 3,
    /// 语音已播放
    Played = 4,
}

impl AckLevel {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_read(self) -> bool {
        self >= AckLevel::Read
    }
}

impl From<AckLevel> for i32 {
    fn from(level: AckLevel) -> Self {
        level.as_i32()
    }
}

impl TryFrom<i32> for AckLevel {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AckLevel::Pending),
            1 => Ok(AckLevel::Sent),
            2 => Ok(AckLevel::Delivered),
            3 => Ok(AckLevel::Read),
            4 => Ok(AckLevel::Played),
            other => Err(DomainError::Validation(format!(
                "ack level out of range: {}",
                other
            ))),
        }
    }
}

/// 消息记录，只追加不修改正文
///
/// `is_private` 为真的消息是内部备注，永远不会发送到外部通道，
/// 也不会出现在面向客户的会话记录中。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// 通道原生消息 ID
    pub id: String,
    pub company_id: Uuid,
    pub ticket_id: Uuid,
    pub contact_id: Option<Uuid>,
    pub body: String,
    pub ack: AckLevel,
    pub read: bool,
    pub media_type: Option<String>,
    pub media_url: Option<String>,
    pub from_me: bool,
    pub is_private: bool,
    pub quoted_msg_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 追加消息参数
#[derive(Debug, Clone, Default)]
pub struct NewMessage {
    /// 通道消息 ID，缺省时生成
    pub id: Option<String>,
    pub body: String,
    pub from_me: bool,
    pub is_private: bool,
    pub quoted_msg_id: Option<String>,
    pub media_type: Option<String>,
    pub media_url: Option<String>,
}

impl Message {
    pub fn new(company_id: Uuid, ticket_id: Uuid, contact_id: Option<Uuid>, params: NewMessage) -> Self {
        let now = Utc::now();
        Self {
            id: params.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            company_id,
            ticket_id,
            contact_id,
            body: params.body,
            ack: AckLevel::Pending,
            read: params.from_me,
            media_type: params.media_type,
            media_url: params.media_url,
            from_me: params.from_me,
            is_private: params.is_private,
            quoted_msg_id: params.quoted_msg_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// 是否需要发送到外部通道
    pub fn is_dispatchable(&self) -> bool {
        self.from_me && !self.is_private
    }

    /// 是否计入工单未读数
    pub fn counts_as_unread(&self) -> bool {
        !self.from_me && !self.is_private
    }

    /// 指标中的方向标签
    pub fn direction(&self) -> &'static str {
        if self.from_me {
            "outbound"
        } else {
            "inbound"
        }
    }

    pub fn visibility(&self) -> &'static str {
        if self.is_private {
            "private"
        } else {
            "public"
        }
    }
}

/// 面向客户的会话记录，排除内部备注
pub fn customer_transcript(messages: Vec<Message>) -> Vec<Message> {
    messages.into_iter().filter(|m| !m.is_private).collect()
}
