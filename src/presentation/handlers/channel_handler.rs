// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use super::success;
use crate::application::dto::channel_request::{AckUpdateDto, ConnectionStatusDto};
use crate::domain::services::connection_service::ConnectionService;
use crate::domain::services::message_service::MessageService;
use crate::domain::use_cases::handle_inbound_message::{HandleInboundMessage, InboundMessage};
use crate::presentation::errors::AppError;

/// 通道投递的客户消息
pub async fn receive_message(
    Extension(inbound): Extension<Arc<HandleInboundMessage>>,
    Path(connection_id): Path<Uuid>,
    Json(payload): Json<InboundMessage>,
) -> Result<Json<Value>, AppError> {
    Ok(success(inbound.execute(connection_id, payload).await?))
}

/// 送达确认，级别只会前进
pub async fn receive_ack(
    Extension(messages): Extension<Arc<MessageService>>,
    Extension(connections): Extension<Arc<ConnectionService>>,
    Json(payload): Json<AckUpdateDto>,
) -> Result<Json<Value>, AppError> {
    let company_id = match payload.connection_id {
        Some(connection_id) => Some(connections.company_of(connection_id).await?),
        None => None,
    };
    Ok(success(
        messages
            .update_ack(company_id, &payload.id, payload.ack)
            .await?,
    ))
}

pub async fn report_status(
    Extension(connections): Extension<Arc<ConnectionService>>,
    Path(connection_id): Path<Uuid>,
    Json(payload): Json<ConnectionStatusDto>,
) -> Result<Json<Value>, AppError> {
    Ok(success(
        connections
            .report_status(connection_id, payload.status)
            .await?,
    ))
}
