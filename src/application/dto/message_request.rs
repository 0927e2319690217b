// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::message_service::SendMessageInput;
use serde::Deserialize;
use validator::Validate;

/// 发送消息或内部备注请求DTO
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequestDto {
    #[validate(length(min = 1, max = 4096))]
    pub body: String,
    #[serde(default)]
    pub is_private: bool,
    pub quoted_msg_id: Option<String>,
}

impl From<SendMessageRequestDto> for SendMessageInput {
    fn from(dto: SendMessageRequestDto) -> Self {
        Self {
            body: dto.body,
            is_private: dto.is_private,
            quoted_msg_id: dto.quoted_msg_id,
        }
    }
}
