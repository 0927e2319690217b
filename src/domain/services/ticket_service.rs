// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::{DomainError, EntityKind};
use crate::domain::models::message::NewMessage;
use crate::domain::models::plan::Feature;
use crate::domain::models::ticket::{
    NewTicket, Ticket, TicketFilter, TicketStatus, TicketTransition,
};
use crate::domain::models::user::AuthUser;
use crate::domain::repositories::connection_repository::ConnectionRepository;
use crate::domain::repositories::contact_repository::ContactRepository;
use crate::domain::repositories::queue_repository::QueueRepository;
use crate::domain::repositories::ticket_repository::TicketRepository;
use crate::domain::services::message_service::MessageService;
use crate::domain::services::plan_service::PlanService;
use crate::domain::services::tenant_guard::load_ticket;
use chrono::Utc;
use metrics::counter;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// 系统发起的转换在冲突时的最大重试次数
const MAX_TRANSITION_ATTEMPTS: usize = 3;

#[derive(Debug, Clone)]
pub struct CreateTicketInput {
    pub contact_id: Uuid,
    pub body: String,
    pub queue_id: Option<Uuid>,
    pub whatsapp_id: Option<Uuid>,
}

/// 看板中的一列
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanColumn {
    pub queue_id: Option<Uuid>,
    pub queue_name: Option<String>,
    pub tickets: Vec<Ticket>,
}

/// 以路由快照为条件提交转换
///
/// 条件不满足时返回 `DomainError::TicketConflict`，工单未被修改
pub async fn commit_transition(
    repo: &dyn TicketRepository,
    mut ticket: Ticket,
    transition: TicketTransition,
) -> Result<Ticket, DomainError> {
    let now = Utc::now();
    if !repo.apply_transition(&transition, now).await? {
        debug!(ticket_id = %ticket.id, kind = transition.kind, "Ticket transition lost a race");
        return Err(DomainError::TicketConflict);
    }
    counter!("ispdesk_ticket_transitions_total", "transition" => transition.kind).increment(1);
    ticket.apply(&transition, now);
    Ok(ticket)
}

/// 工单服务
///
/// 工单的创建、查询、已读、结束和看板视图。所有操作先经过租户检查，
/// 再由工单模型计算状态转换。
pub struct TicketService {
    ticket_repo: Arc<dyn TicketRepository>,
    contact_repo: Arc<dyn ContactRepository>,
    connection_repo: Arc<dyn ConnectionRepository>,
    queue_repo: Arc<dyn QueueRepository>,
    messages: Arc<MessageService>,
    plan_service: Arc<PlanService>,
}

impl TicketService {
    pub fn new(
        ticket_repo: Arc<dyn TicketRepository>,
        contact_repo: Arc<dyn ContactRepository>,
        connection_repo: Arc<dyn ConnectionRepository>,
        queue_repo: Arc<dyn QueueRepository>,
        messages: Arc<MessageService>,
        plan_service: Arc<PlanService>,
    ) -> Self {
        Self {
            ticket_repo,
            contact_repo,
            connection_repo,
            queue_repo,
            messages,
            plan_service,
        }
    }

    pub async fn list_tickets(
        &self,
        acting: &AuthUser,
        filter: &TicketFilter,
    ) -> Result<Vec<Ticket>, DomainError> {
        Ok(self.ticket_repo.list(acting.company_id, filter).await?)
    }

    pub async fn show_ticket(&self, acting: &AuthUser, id: Uuid) -> Result<Ticket, DomainError> {
        load_ticket(self.ticket_repo.as_ref(), acting.company_id, id).await
    }

    /// 坐席主动发起会话
    ///
    /// 联系人已有未结束的工单时复用该工单，否则在指定连接（或公司默认连接）
    /// 上新建工单。首条消息以 `from_me` 身份发送到通道。
    pub async fn create_ticket(
        &self,
        acting: &AuthUser,
        input: CreateTicketInput,
    ) -> Result<Ticket, DomainError> {
        let company_id = acting.company_id;
        let contact = self
            .contact_repo
            .find_by_id(company_id, input.contact_id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::Contact))?;

        if let Some(queue_id) = input.queue_id {
            self.queue_repo
                .find_by_id(company_id, queue_id)
                .await?
                .ok_or(DomainError::NotFound(EntityKind::Queue))?;
        }

        let ticket = match self
            .ticket_repo
            .find_active_for_contact(company_id, contact.id)
            .await?
        {
            Some(existing) => {
                debug!(ticket_id = %existing.id, contact_id = %contact.id, "Reusing active ticket");
                existing
            }
            None => {
                let whatsapp_id = match input.whatsapp_id {
                    Some(id) => Some(
                        self.connection_repo
                            .find_by_id(company_id, id)
                            .await?
                            .ok_or(DomainError::NotFound(EntityKind::Connection))?
                            .id,
                    ),
                    None => self
                        .connection_repo
                        .find_default(company_id)
                        .await?
                        .map(|connection| connection.id),
                };

                let ticket = self
                    .ticket_repo
                    .create(&Ticket::new(NewTicket {
                        company_id,
                        contact_id: contact.id,
                        queue_id: input.queue_id,
                        user_id: None,
                        whatsapp_id,
                    }))
                    .await?;
                counter!("ispdesk_tickets_created_total").increment(1);
                info!(ticket_id = %ticket.id, company_id = %company_id, "Ticket created");
                ticket
            }
        };

        self.messages
            .post_outbound(
                &ticket,
                NewMessage {
                    body: input.body,
                    ..Default::default()
                },
            )
            .await?;

        self.reload(&ticket).await
    }

    /// 坐席已读：未读清零并把消息标记为已读
    pub async fn mark_read(&self, acting: &AuthUser, id: Uuid) -> Result<Ticket, DomainError> {
        let ticket = load_ticket(self.ticket_repo.as_ref(), acting.company_id, id).await?;
        let ticket = self.retry_transition(ticket, |t| Ok(t.mark_read())).await?;
        self.messages.mark_ticket_read(&ticket).await?;
        Ok(ticket)
    }

    /// 结束工单
    ///
    /// 未读清零并停止自动化流程，随后发送连接配置的告别语并请求满意度调查
    pub async fn resolve_ticket(&self, acting: &AuthUser, id: Uuid) -> Result<Ticket, DomainError> {
        let ticket = load_ticket(self.ticket_repo.as_ref(), acting.company_id, id).await?;
        let transition = ticket.resolve(Utc::now())?;
        let ticket = commit_transition(self.ticket_repo.as_ref(), ticket, transition).await?;

        if let Some(connection_id) = ticket.whatsapp_id {
            let farewell = self
                .connection_repo
                .find_by_id(ticket.company_id, connection_id)
                .await?
                .and_then(|connection| connection.farewell_message)
                .filter(|message| !message.trim().is_empty());
            if let Some(body) = farewell {
                self.messages
                    .post_outbound(
                        &ticket,
                        NewMessage {
                            body,
                            ..Default::default()
                        },
                    )
                    .await?;
            }
        }

        info!(
            name: "satisfaction_survey_requested",
            ticket_id = %ticket.id,
            company_id = %ticket.company_id,
            contact_id = %ticket.contact_id,
            "Satisfaction survey requested"
        );
        info!(ticket_id = %ticket.id, by = %acting.id, "Ticket resolved");
        Ok(ticket)
    }

    /// 收到客户消息后的转换
    ///
    /// 已结束的工单重新回到 Pending，其余状态只增加未读数；
    /// 与坐席操作冲突时重新加载后重试。
    pub async fn receive_inbound(&self, ticket: Ticket) -> Result<Ticket, DomainError> {
        let reopening = ticket.is_closed();
        let ticket = self
            .retry_transition(ticket, |t| Ok(t.receive_inbound()))
            .await?;
        if reopening {
            info!(ticket_id = %ticket.id, "Closed ticket reopened by customer message");
        }
        Ok(ticket)
    }

    /// 看板：按队列分组的未结束工单
    pub async fn kanban(&self, acting: &AuthUser) -> Result<Vec<KanbanColumn>, DomainError> {
        self.plan_service
            .require_feature(acting.company_id, Feature::Kanban)
            .await?;

        let queues = self.queue_repo.list(acting.company_id).await?;
        let tickets: Vec<Ticket> = self
            .ticket_repo
            .list(acting.company_id, &TicketFilter::default())
            .await?
            .into_iter()
            .filter(|t| t.status != TicketStatus::Closed)
            .collect();

        let column = |queue_id: Option<Uuid>| -> Vec<Ticket> {
            tickets
                .iter()
                .filter(|t| t.queue_id == queue_id)
                .cloned()
                .collect()
        };

        let mut columns = Vec::with_capacity(queues.len() + 1);
        columns.push(KanbanColumn {
            queue_id: None,
            queue_name: None,
            tickets: column(None),
        });
        for queue in queues {
            columns.push(KanbanColumn {
                queue_id: Some(queue.id),
                tickets: column(Some(queue.id)),
                queue_name: Some(queue.name),
            });
        }

        Ok(columns)
    }

    async fn reload(&self, ticket: &Ticket) -> Result<Ticket, DomainError> {
        self.ticket_repo
            .find_by_id(ticket.company_id, ticket.id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::Ticket))
    }

    async fn retry_transition<F>(&self, mut ticket: Ticket, plan: F) -> Result<Ticket, DomainError>
    where
        F: Fn(&Ticket) -> Result<TicketTransition, DomainError>,
    {
        let mut attempt = 1;
        loop {
            let transition = plan(&ticket)?;
            match commit_transition(self.ticket_repo.as_ref(), ticket.clone(), transition).await {
                Err(DomainError::TicketConflict) if attempt < MAX_TRANSITION_ATTEMPTS => {
                    attempt += 1;
                    ticket = self.reload(&ticket).await?;
                }
                result => return result,
            }
        }
    }
}
