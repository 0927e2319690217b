// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::user::Profile;
use crate::domain::services::user_service::{NewUserInput, UserUpdate};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// 创建坐席请求DTO
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequestDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub queue_ids: Vec<Uuid>,
}

impl From<CreateUserRequestDto> for NewUserInput {
    fn from(dto: CreateUserRequestDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            password: dto.password,
            profile: dto.profile,
            queue_ids: dto.queue_ids,
        }
    }
}

/// 修改坐席请求DTO，缺省字段保持不变
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequestDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 128))]
    pub password: Option<String>,
    pub profile: Option<Profile>,
    pub active: Option<bool>,
    pub queue_ids: Option<Vec<Uuid>>,
}

impl From<UpdateUserRequestDto> for UserUpdate {
    fn from(dto: UpdateUserRequestDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            password: dto.password,
            profile: dto.profile,
            active: dto.active,
            queue_ids: dto.queue_ids,
        }
    }
}
