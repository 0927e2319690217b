// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::ticket_service::CreateTicketInput;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// 坐席主动发起会话请求DTO
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequestDto {
    pub contact_id: Uuid,
    /// 首条消息
    #[validate(length(min = 1))]
    pub body: String,
    pub queue_id: Option<Uuid>,
    pub whatsapp_id: Option<Uuid>,
}

impl From<CreateTicketRequestDto> for CreateTicketInput {
    fn from(dto: CreateTicketRequestDto) -> Self {
        Self {
            contact_id: dto.contact_id,
            body: dto.body,
            queue_id: dto.queue_id,
            whatsapp_id: dto.whatsapp_id,
        }
    }
}

/// 转移工单请求DTO
///
/// `queueId` 与 `userId` 必须且只能给出一个
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_transfer_target"))]
pub struct TransferTicketRequestDto {
    pub queue_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

/// 转移目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferTarget {
    Queue(Uuid),
    User(Uuid),
}

impl TransferTicketRequestDto {
    pub fn target(&self) -> Option<TransferTarget> {
        match (self.queue_id, self.user_id) {
            (Some(queue_id), None) => Some(TransferTarget::Queue(queue_id)),
            (None, Some(user_id)) => Some(TransferTarget::User(user_id)),
            _ => None,
        }
    }
}

fn validate_transfer_target(dto: &TransferTicketRequestDto) -> Result<(), ValidationError> {
    if dto.target().is_none() {
        return Err(ValidationError::new("exactly_one_target"));
    }
    Ok(())
}
