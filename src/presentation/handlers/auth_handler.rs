// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

use super::success;
use crate::application::dto::auth_request::LoginRequestDto;
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::user_service::UserService;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::CurrentUser;

/// 登录并签发令牌
pub async fn login(
    Extension(auth): Extension<Arc<AuthService>>,
    Json(payload): Json<LoginRequestDto>,
) -> Result<Json<Value>, AppError> {
    payload.validate()?;
    let result = auth
        .login(&payload.email, &payload.password, payload.company_id)
        .await?;
    Ok(success(json!({
        "token": result.token,
        "user": result.user,
    })))
}

/// 注销当前用户的全部会话
pub async fn logout(
    Extension(auth): Extension<Arc<AuthService>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    auth.logout(&user).await?;
    Ok(success(Value::Null))
}

/// 当前用户信息
pub async fn me(
    Extension(users): Extension<Arc<UserService>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    let details = users.get_user(&user, user.id).await?;
    Ok(success(details))
}
