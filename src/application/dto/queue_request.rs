// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::queue_service::QueueInput;
use serde::Deserialize;
use validator::Validate;

/// 创建或修改队列请求DTO
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QueueRequestDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// 十六进制颜色，例如 `#2f80ed`
    #[validate(length(min = 1, max = 32))]
    pub color: String,
    pub greeting_message: Option<String>,
}

impl From<QueueRequestDto> for QueueInput {
    fn from(dto: QueueRequestDto) -> Self {
        Self {
            name: dto.name,
            color: dto.color,
            greeting_message: dto.greeting_message,
        }
    }
}
