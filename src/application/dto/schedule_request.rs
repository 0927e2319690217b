// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

/// 创建定时消息请求DTO
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequestDto {
    #[validate(length(min = 1, max = 4096))]
    pub body: String,
    pub send_at: DateTime<Utc>,
}
