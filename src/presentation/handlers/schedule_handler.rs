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
use crate::application::dto::schedule_request::CreateScheduleRequestDto;
use crate::domain::services::schedule_service::ScheduleService;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::CurrentUser;

pub async fn list_schedules(
    Extension(schedules): Extension<Arc<ScheduleService>>,
    CurrentUser(user): CurrentUser,
    Path(ticket_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    Ok(success(schedules.list_schedules(&user, ticket_id).await?))
}

pub async fn create_schedule(
    Extension(schedules): Extension<Arc<ScheduleService>>,
    CurrentUser(user): CurrentUser,
    Path(ticket_id): Path<Uuid>,
    Json(payload): Json<CreateScheduleRequestDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload.validate()?;
    let schedule = schedules
        .create_schedule(&user, ticket_id, payload.body, payload.send_at)
        .await?;
    Ok((StatusCode::CREATED, success(schedule)))
}

/// 删除尚未发送的定时消息
pub async fn delete_schedule(
    Extension(schedules): Extension<Arc<ScheduleService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    schedules.delete_schedule(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
