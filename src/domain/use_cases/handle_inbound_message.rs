// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::{DomainError, EntityKind};
use crate::domain::models::contact::ChannelAddress;
use crate::domain::models::message::{Message, NewMessage};
use crate::domain::models::plan::Feature;
use crate::domain::models::ticket::{NewTicket, Ticket};
use crate::domain::repositories::connection_repository::ConnectionRepository;
use crate::domain::repositories::ticket_repository::TicketRepository;
use crate::domain::services::ai_service::{AiProvider, ChatRole, ChatTurn};
use crate::domain::services::auto_reply::{self, AutoReply};
use crate::domain::services::contact_service::ContactService;
use crate::domain::services::message_service::MessageService;
use crate::domain::services::plan_service::PlanService;
use crate::domain::services::settings_store::SettingsStore;
use crate::domain::services::ticket_service::TicketService;
use chrono::Utc;
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// AI 回复时携带的历史消息条数
const AI_HISTORY_LIMIT: u64 = 20;

/// 通道投递的客户消息
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMessage {
    /// 通道消息ID，用于去重
    pub id: Option<String>,
    /// 发送方原始地址，例如 `5511987654321@s.whatsapp.net`
    pub from: String,
    pub contact_name: Option<String>,
    #[serde(default)]
    pub body: String,
    pub media_type: Option<String>,
    pub media_url: Option<String>,
    pub quoted_msg_id: Option<String>,
}

/// 处理结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundOutcome {
    pub ticket: Ticket,
    /// 重复投递时为空
    pub message: Option<Message>,
    pub auto_reply: Option<Message>,
}

/// 处理通道投递的客户消息
///
/// 依次完成：由连接确定租户、查找或创建联系人、选择（必要时新建）工单、
/// 追加消息、重新打开工单并增加未读数、决定是否自动回复。消息在工单转换之前写入，
/// 被判定为重复的投递不会改变工单。外部依赖失败只记录日志，不影响消息入库。
pub struct HandleInboundMessage {
    connection_repo: Arc<dyn ConnectionRepository>,
    ticket_repo: Arc<dyn TicketRepository>,
    contacts: Arc<ContactService>,
    tickets: Arc<TicketService>,
    messages: Arc<MessageService>,
    settings: Arc<SettingsStore>,
    plan_service: Arc<PlanService>,
    ai: Arc<dyn AiProvider>,
}

impl HandleInboundMessage {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connection_repo: Arc<dyn ConnectionRepository>,
        ticket_repo: Arc<dyn TicketRepository>,
        contacts: Arc<ContactService>,
        tickets: Arc<TicketService>,
        messages: Arc<MessageService>,
        settings: Arc<SettingsStore>,
        plan_service: Arc<PlanService>,
        ai: Arc<dyn AiProvider>,
    ) -> Self {
        Self {
            connection_repo,
            ticket_repo,
            contacts,
            tickets,
            messages,
            settings,
            plan_service,
            ai,
        }
    }

    pub async fn execute(
        &self,
        connection_id: Uuid,
        inbound: InboundMessage,
    ) -> Result<InboundOutcome, DomainError> {
        let connection = self
            .connection_repo
            .find_for_channel(connection_id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::Connection))?;
        let company_id = connection.company_id;

        let address = ChannelAddress::parse(&inbound.from)?;
        let contact = self
            .contacts
            .find_or_create(company_id, &address, inbound.contact_name.clone())
            .await?;

        let latest = self
            .ticket_repo
            .find_latest_for_contact(company_id, contact.id, Some(connection.id))
            .await?;

        let ticket = match latest {
            Some(ticket) => ticket,
            None => {
                let ticket = self
                    .ticket_repo
                    .create(&Ticket::new(NewTicket {
                        company_id,
                        contact_id: contact.id,
                        whatsapp_id: Some(connection.id),
                        ..Default::default()
                    }))
                    .await?;
                counter!("ispdesk_tickets_created_total").increment(1);
                info!(ticket_id = %ticket.id, company_id = %company_id, "Ticket opened by customer");
                ticket
            }
        };

        let body = inbound.body.clone();
        let message = self
            .messages
            .append_inbound(
                &ticket,
                NewMessage {
                    id: inbound.id,
                    body: inbound.body,
                    media_type: inbound.media_type,
                    media_url: inbound.media_url,
                    quoted_msg_id: inbound.quoted_msg_id,
                    ..Default::default()
                },
            )
            .await?;

        // 重复投递不能重新打开工单，也不增加未读数
        let message = match message {
            Some(message) => message,
            None => {
                debug!(ticket_id = %ticket.id, "Redelivered channel message ignored");
                return Ok(InboundOutcome {
                    ticket,
                    message: None,
                    auto_reply: None,
                });
            }
        };

        let ticket = self.tickets.receive_inbound(ticket).await?;

        let auto_reply = self.auto_reply(&ticket, &message, &body).await?;

        Ok(InboundOutcome {
            ticket,
            message: Some(message),
            auto_reply,
        })
    }

    async fn auto_reply(
        &self,
        ticket: &Ticket,
        message: &Message,
        body: &str,
    ) -> Result<Option<Message>, DomainError> {
        let settings = self.settings.load(ticket.company_id).await?;
        let plan_allows_ai = self
            .plan_service
            .is_feature_enabled(ticket.company_id, Feature::OpenAi)
            .await?;

        let decision = auto_reply::decide(&settings, plan_allows_ai, Utc::now());
        let reply = match &decision {
            AutoReply::None => None,
            AutoReply::OutOfHours(text) => Some(text.clone()),
            // 坐席接手后不再由 AI 回复
            AutoReply::Ai { .. } if ticket.user_id.is_some() => None,
            AutoReply::Ai { system_prompt } => {
                self.ask_ai(ticket, message, body, system_prompt).await?
            }
        };

        let reply = match reply {
            Some(reply) => reply,
            None => return Ok(None),
        };

        let sent = self
            .messages
            .post_outbound(
                ticket,
                NewMessage {
                    body: reply,
                    ..Default::default()
                },
            )
            .await?;
        counter!("ispdesk_auto_replies_total", "kind" => decision.kind()).increment(1);
        Ok(Some(sent))
    }

    async fn ask_ai(
        &self,
        ticket: &Ticket,
        message: &Message,
        body: &str,
        system_prompt: &str,
    ) -> Result<Option<String>, DomainError> {
        let history: Vec<ChatTurn> = self
            .messages
            .recent_history(ticket, AI_HISTORY_LIMIT)
            .await?
            .into_iter()
            .filter(|m| m.id != message.id)
            .map(|m| ChatTurn {
                role: if m.from_me {
                    ChatRole::Assistant
                } else {
                    ChatRole::User
                },
                content: m.body,
            })
            .collect();

        match self.ai.complete(body, &history, system_prompt).await {
            Ok(text) if !text.trim().is_empty() => Ok(Some(text)),
            Ok(_) => Ok(None),
            Err(e) => {
                warn!(ticket_id = %ticket.id, "AI provider unavailable: {}", e);
                counter!("ispdesk_external_failures_total", "dependency" => "ai").increment(1);
                Ok(None)
            }
        }
    }
}
