// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

use super::success;
use crate::application::dto::connection_request::ConnectionRequestDto;
use crate::domain::services::connection_service::ConnectionService;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::CurrentUser;

pub async fn list_connections(
    Extension(connections): Extension<Arc<ConnectionService>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    Ok(success(connections.list_connections(&user).await?))
}

/// 新建通道连接，受套餐连接上限约束
pub async fn create_connection(
    Extension(connections): Extension<Arc<ConnectionService>>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<ConnectionRequestDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload.validate()?;
    let connection = connections.create_connection(&user, payload.into()).await?;
    Ok((StatusCode::CREATED, success(connection)))
}
