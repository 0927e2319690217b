// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::success;
use crate::application::dto::user_request::{CreateUserRequestDto, UpdateUserRequestDto};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::user_service::UserService;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::CurrentUser;

pub async fn list_users(
    Extension(users): Extension<Arc<UserService>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    Ok(success(users.list_users(&user).await?))
}

/// 创建坐席，受套餐坐席上限约束
pub async fn create_user(
    Extension(users): Extension<Arc<UserService>>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateUserRequestDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload.validate()?;
    let created = users.create_user(&user, payload.into()).await?;
    Ok((StatusCode::CREATED, success(created)))
}

pub async fn update_user(
    Extension(users): Extension<Arc<UserService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequestDto>,
) -> Result<Json<Value>, AppError> {
    payload.validate()?;
    Ok(success(users.update_user(&user, id, payload.into()).await?))
}

/// 管理员强制下线
pub async fn force_logout(
    Extension(auth): Extension<Arc<AuthService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    auth.force_logout(&user, id).await?;
    Ok(success(Value::Null))
}
