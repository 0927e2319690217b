// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::{DomainError, EntityKind};
use crate::domain::models::message::{customer_transcript, AckLevel, Message, NewMessage};
use crate::domain::models::ticket::Ticket;
use crate::domain::models::user::AuthUser;
use crate::domain::repositories::contact_repository::ContactRepository;
use crate::domain::repositories::message_repository::MessageRepository;
use crate::domain::repositories::ticket_repository::TicketRepository;
use crate::domain::services::channel_service::{ChannelService, OutboundMessage};
use crate::domain::services::tenant_guard::load_ticket;
use chrono::Utc;
use metrics::counter;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

const PREVIEW_CHARS: usize = 255;

#[derive(Debug, Clone)]
pub struct SendMessageInput {
    pub body: String,
    pub is_private: bool,
    pub quoted_msg_id: Option<String>,
}

/// 消息服务
///
/// 负责追加消息、向通道发送、送达确认和会话记录导出。
/// 内部备注只写入消息表，不会到达通道，也不会更新工单预览。
pub struct MessageService {
    message_repo: Arc<dyn MessageRepository>,
    ticket_repo: Arc<dyn TicketRepository>,
    contact_repo: Arc<dyn ContactRepository>,
    channel: Arc<dyn ChannelService>,
}

impl MessageService {
    pub fn new(
        message_repo: Arc<dyn MessageRepository>,
        ticket_repo: Arc<dyn TicketRepository>,
        contact_repo: Arc<dyn ContactRepository>,
        channel: Arc<dyn ChannelService>,
    ) -> Self {
        Self {
            message_repo,
            ticket_repo,
            contact_repo,
            channel,
        }
    }

    /// 坐席发送消息或内部备注
    pub async fn send_message(
        &self,
        acting: &AuthUser,
        ticket_id: Uuid,
        input: SendMessageInput,
    ) -> Result<Message, DomainError> {
        let ticket = load_ticket(self.ticket_repo.as_ref(), acting.company_id, ticket_id).await?;
        self.post_outbound(
            &ticket,
            NewMessage {
                body: input.body,
                is_private: input.is_private,
                quoted_msg_id: input.quoted_msg_id,
                ..Default::default()
            },
        )
        .await
    }

    /// 追加一条 `from_me` 消息，需要时发送到通道
    ///
    /// 发送成功时消息 ID 替换为通道返回的送达 ID，确认级别为 Sent；
    /// 发送失败只记录日志，消息保留生成的 ID 和 Pending 级别。
    pub async fn post_outbound(&self, ticket: &Ticket, params: NewMessage) -> Result<Message, DomainError> {
        let mut message = Message::new(
            ticket.company_id,
            ticket.id,
            Some(ticket.contact_id),
            NewMessage {
                from_me: true,
                ..params
            },
        );

        if message.is_dispatchable() {
            if let Some(delivery_id) = self.dispatch(ticket, &message).await {
                message.id = delivery_id;
                message.ack = AckLevel::Sent;
            }
        }

        self.store(ticket, &message).await?;
        Ok(message)
    }

    /// 追加客户发来的消息，重复投递的通道消息返回 `None`
    pub async fn append_inbound(
        &self,
        ticket: &Ticket,
        params: NewMessage,
    ) -> Result<Option<Message>, DomainError> {
        let message = Message::new(
            ticket.company_id,
            ticket.id,
            Some(ticket.contact_id),
            NewMessage {
                from_me: false,
                is_private: false,
                ..params
            },
        );
        if !self.store(ticket, &message).await? {
            return Ok(None);
        }
        Ok(Some(message))
    }

    async fn store(&self, ticket: &Ticket, message: &Message) -> Result<bool, DomainError> {
        if !self.message_repo.append(message).await? {
            debug!(message_id = %message.id, ticket_id = %ticket.id, "Duplicate message ignored");
            return Ok(false);
        }

        if !message.is_private {
            let preview: String = message.body.chars().take(PREVIEW_CHARS).collect();
            self.ticket_repo
                .update_preview(ticket.company_id, ticket.id, &preview, Utc::now())
                .await?;
        }

        counter!(
            "ispdesk_messages_appended_total",
            "direction" => message.direction(),
            "visibility" => message.visibility()
        )
        .increment(1);
        Ok(true)
    }

    async fn dispatch(&self, ticket: &Ticket, message: &Message) -> Option<String> {
        let contact = match self
            .contact_repo
            .find_by_id(ticket.company_id, ticket.contact_id)
            .await
        {
            Ok(Some(contact)) => contact,
            Ok(None) => {
                warn!(ticket_id = %ticket.id, "Ticket contact missing, message not dispatched");
                return None;
            }
            Err(e) => {
                warn!(ticket_id = %ticket.id, "Failed to load contact for dispatch: {}", e);
                return None;
            }
        };

        let outbound = OutboundMessage {
            company_id: ticket.company_id,
            connection_id: ticket.whatsapp_id,
            ticket_id: ticket.id,
            number: contact.number,
            is_group: contact.is_group,
            body: message.body.clone(),
            quoted_msg_id: message.quoted_msg_id.clone(),
        };

        match self.channel.send_message(&outbound).await {
            Ok(delivery_id) => Some(delivery_id),
            Err(e) => {
                warn!(
                    ticket_id = %ticket.id,
                    company_id = %ticket.company_id,
                    "Channel dispatch failed: {}",
                    e
                );
                counter!("ispdesk_external_failures_total", "dependency" => "channel").increment(1);
                None
            }
        }
    }

    /// 员工视图：包含内部备注
    pub async fn list_messages(&self, acting: &AuthUser, ticket_id: Uuid) -> Result<Vec<Message>, DomainError> {
        let ticket = load_ticket(self.ticket_repo.as_ref(), acting.company_id, ticket_id).await?;
        Ok(self
            .message_repo
            .list_for_ticket(ticket.company_id, ticket.id)
            .await?)
    }

    /// 面向客户的会话记录：排除内部备注
    pub async fn export_transcript(
        &self,
        acting: &AuthUser,
        ticket_id: Uuid,
    ) -> Result<Vec<Message>, DomainError> {
        let messages = self.list_messages(acting, ticket_id).await?;
        Ok(customer_transcript(messages))
    }

    /// 最近的公开消息，供 AI 回复使用
    pub async fn recent_history(&self, ticket: &Ticket, limit: u64) -> Result<Vec<Message>, DomainError> {
        Ok(self
            .message_repo
            .recent_public(ticket.company_id, ticket.id, limit)
            .await?)
    }

    /// 通道上报送达确认
    ///
    /// 只作用于外发消息。级别只会前进：低于或等于已存级别的确认不产生任何变更
    pub async fn update_ack(
        &self,
        company_id: Option<Uuid>,
        message_id: &str,
        ack: i32,
    ) -> Result<Message, DomainError> {
        let level = AckLevel::try_from(ack)?;
        let applied = self
            .message_repo
            .update_ack(company_id, message_id, level)
            .await?;
        if !applied {
            debug!(message_id = %message_id, ack = ack, "Stale ack ignored");
        }
        self.message_repo
            .find_for_channel(company_id, message_id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::Message))
    }

    pub async fn mark_ticket_read(&self, ticket: &Ticket) -> Result<u64, DomainError> {
        Ok(self
            .message_repo
            .mark_ticket_read(ticket.company_id, ticket.id)
            .await?)
    }
}
