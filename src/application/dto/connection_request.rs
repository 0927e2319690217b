// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::connection_service::ConnectionInput;
use serde::Deserialize;
use validator::Validate;

/// 创建通道连接请求DTO
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequestDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub greeting_message: Option<String>,
    pub farewell_message: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

impl From<ConnectionRequestDto> for ConnectionInput {
    fn from(dto: ConnectionRequestDto) -> Self {
        Self {
            name: dto.name,
            greeting_message: dto.greeting_message,
            farewell_message: dto.farewell_message,
            is_default: dto.is_default,
        }
    }
}
