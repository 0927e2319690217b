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
use crate::application::dto::queue_request::QueueRequestDto;
use crate::domain::services::queue_service::QueueService;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::CurrentUser;

pub async fn list_queues(
    Extension(queues): Extension<Arc<QueueService>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    Ok(success(queues.list_queues(&user).await?))
}

pub async fn create_queue(
    Extension(queues): Extension<Arc<QueueService>>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<QueueRequestDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload.validate()?;
    let queue = queues.create_queue(&user, payload.into()).await?;
    Ok((StatusCode::CREATED, success(queue)))
}

pub async fn update_queue(
    Extension(queues): Extension<Arc<QueueService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<QueueRequestDto>,
) -> Result<Json<Value>, AppError> {
    payload.validate()?;
    Ok(success(queues.update_queue(&user, id, payload.into()).await?))
}

/// 删除队列，工单被移出队列，消息保留
pub async fn delete_queue(
    Extension(queues): Extension<Arc<QueueService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    queues.delete_queue(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
