// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::success;
use crate::application::dto::ticket_request::{
    CreateTicketRequestDto, TransferTarget, TransferTicketRequestDto,
};
use crate::domain::errors::DomainError;
use crate::domain::models::ticket::TicketFilter;
use crate::domain::services::queue_service::QueueService;
use crate::domain::services::ticket_service::TicketService;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::CurrentUser;

/// 工单列表，可按状态、队列和坐席过滤
pub async fn list_tickets(
    Extension(tickets): Extension<Arc<TicketService>>,
    CurrentUser(user): CurrentUser,
    Query(filter): Query<TicketFilter>,
) -> Result<Json<Value>, AppError> {
    Ok(success(tickets.list_tickets(&user, &filter).await?))
}

pub async fn show_ticket(
    Extension(tickets): Extension<Arc<TicketService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    Ok(success(tickets.show_ticket(&user, id).await?))
}

/// 坐席主动发起会话
pub async fn create_ticket(
    Extension(tickets): Extension<Arc<TicketService>>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateTicketRequestDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload.validate()?;
    let ticket = tickets.create_ticket(&user, payload.into()).await?;
    Ok((StatusCode::CREATED, success(ticket)))
}

pub async fn kanban(
    Extension(tickets): Extension<Arc<TicketService>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    Ok(success(tickets.kanban(&user).await?))
}

/// 转移工单到队列或坐席
pub async fn transfer_ticket(
    Extension(queues): Extension<Arc<QueueService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransferTicketRequestDto>,
) -> Result<Json<Value>, AppError> {
    payload.validate()?;
    let ticket = match payload.target() {
        Some(TransferTarget::Queue(queue_id)) => queues.transfer_to_queue(&user, id, queue_id).await?,
        Some(TransferTarget::User(user_id)) => queues.transfer_to_user(&user, id, user_id).await?,
        None => {
            return Err(DomainError::Validation("queueId or userId is required".to_string()).into())
        }
    };
    Ok(success(ticket))
}

pub async fn resolve_ticket(
    Extension(tickets): Extension<Arc<TicketService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    Ok(success(tickets.resolve_ticket(&user, id).await?))
}

pub async fn mark_read(
    Extension(tickets): Extension<Arc<TicketService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    Ok(success(tickets.mark_read(&user, id).await?))
}
