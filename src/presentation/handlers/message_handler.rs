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
use crate::application::dto::message_request::SendMessageRequestDto;
use crate::domain::services::message_service::MessageService;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::CurrentUser;

/// 员工视图，包含内部备注
pub async fn list_messages(
    Extension(messages): Extension<Arc<MessageService>>,
    CurrentUser(user): CurrentUser,
    Path(ticket_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    Ok(success(messages.list_messages(&user, ticket_id).await?))
}

pub async fn send_message(
    Extension(messages): Extension<Arc<MessageService>>,
    CurrentUser(user): CurrentUser,
    Path(ticket_id): Path<Uuid>,
    Json(payload): Json<SendMessageRequestDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload.validate()?;
    let message = messages.send_message(&user, ticket_id, payload.into()).await?;
    Ok((StatusCode::CREATED, success(message)))
}

/// 面向客户的会话记录，不含内部备注
pub async fn transcript(
    Extension(messages): Extension<Arc<MessageService>>,
    CurrentUser(user): CurrentUser,
    Path(ticket_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    Ok(success(messages.export_transcript(&user, ticket_id).await?))
}
