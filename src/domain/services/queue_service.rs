// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::{DomainError, EntityKind};
use crate::domain::models::plan::Resource;
use crate::domain::models::queue::Queue;
use crate::domain::models::ticket::Ticket;
use crate::domain::models::user::{AuthUser, Profile};
use crate::domain::repositories::queue_repository::QueueRepository;
use crate::domain::repositories::ticket_repository::TicketRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::plan_service::PlanService;
use crate::domain::services::tenant_guard::load_ticket;
use crate::domain::services::ticket_service::commit_transition;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct QueueInput {
    pub name: String,
    pub color: String,
    pub greeting_message: Option<String>,
}

/// 队列路由服务
///
/// 管理队列，并负责把工单转入队列或分配给坐席。转移操作都是
/// 以读取时的路由快照为条件的原子更新，并发冲突返回 `ERR_TICKET_CONFLICT`。
pub struct QueueService {
    queue_repo: Arc<dyn QueueRepository>,
    ticket_repo: Arc<dyn TicketRepository>,
    user_repo: Arc<dyn UserRepository>,
    plan_service: Arc<PlanService>,
}

impl QueueService {
    pub fn new(
        queue_repo: Arc<dyn QueueRepository>,
        ticket_repo: Arc<dyn TicketRepository>,
        user_repo: Arc<dyn UserRepository>,
        plan_service: Arc<PlanService>,
    ) -> Self {
        Self {
            queue_repo,
            ticket_repo,
            user_repo,
            plan_service,
        }
    }

    pub async fn list_queues(&self, acting: &AuthUser) -> Result<Vec<Queue>, DomainError> {
        Ok(self.queue_repo.list(acting.company_id).await?)
    }

    pub async fn create_queue(&self, acting: &AuthUser, input: QueueInput) -> Result<Queue, DomainError> {
        acting.authorize(Profile::Admin)?;
        let cap = self
            .plan_service
            .cap_for(acting.company_id, Resource::Queues)
            .await?;

        let queue = Queue::new(
            acting.company_id,
            input.name,
            input.color,
            input.greeting_message,
        );
        let queue = match cap {
            Some(cap) => self
                .queue_repo
                .create_capped(&queue, cap)
                .await?
                .ok_or(DomainError::PlanLimitExceeded(Resource::Queues))?,
            None => self.queue_repo.create(&queue).await?,
        };
        info!(company_id = %queue.company_id, queue_id = %queue.id, "Queue created");
        Ok(queue)
    }

    pub async fn update_queue(
        &self,
        acting: &AuthUser,
        id: Uuid,
        input: QueueInput,
    ) -> Result<Queue, DomainError> {
        acting.authorize(Profile::Admin)?;
        let mut queue = self.find_queue(acting.company_id, id).await?;
        queue.name = input.name;
        queue.color = input.color;
        queue.greeting_message = input.greeting_message;
        queue.updated_at = Utc::now();
        Ok(self.queue_repo.update(&queue).await?)
    }

    /// 删除队列
    ///
    /// 队列中的工单回到未分配状态，成员关系被移除，消息历史保留
    pub async fn delete_queue(&self, acting: &AuthUser, id: Uuid) -> Result<(), DomainError> {
        acting.authorize(Profile::Admin)?;
        if !self.queue_repo.delete_detaching(acting.company_id, id).await? {
            return Err(DomainError::NotFound(EntityKind::Queue));
        }
        info!(company_id = %acting.company_id, queue_id = %id, "Queue deleted");
        Ok(())
    }

    /// 把工单转入队列
    ///
    /// # 返回值
    ///
    /// * `Ok(Ticket)` - 转移后的工单，状态为 Pending 且无坐席
    /// * `Err(DomainError::ForbiddenTenant)` - 工单属于其他公司
    /// * `Err(DomainError::NotFound(Queue))` - 队列不属于当前公司
    /// * `Err(DomainError::TicketConflict)` - 工单已被并发修改
    pub async fn transfer_to_queue(
        &self,
        acting: &AuthUser,
        ticket_id: Uuid,
        queue_id: Uuid,
    ) -> Result<Ticket, DomainError> {
        let ticket = load_ticket(self.ticket_repo.as_ref(), acting.company_id, ticket_id).await?;
        self.find_queue(acting.company_id, queue_id).await?;

        let transition = ticket.transfer_to_queue(queue_id)?;
        let ticket = commit_transition(self.ticket_repo.as_ref(), ticket, transition).await?;
        info!(ticket_id = %ticket.id, queue_id = %queue_id, by = %acting.id, "Ticket transferred to queue");
        Ok(ticket)
    }

    /// 把工单分配给坐席
    ///
    /// 工单有队列时，目标坐席必须是该队列的成员；没有队列时只要求
    /// 目标是同公司的启用坐席。
    pub async fn transfer_to_user(
        &self,
        acting: &AuthUser,
        ticket_id: Uuid,
        user_id: Uuid,
    ) -> Result<Ticket, DomainError> {
        let ticket = load_ticket(self.ticket_repo.as_ref(), acting.company_id, ticket_id).await?;

        let target = self
            .user_repo
            .find_by_id(acting.company_id, user_id)
            .await?
            .filter(|user| user.active)
            .ok_or(DomainError::NotFound(EntityKind::User))?;

        if let Some(queue_id) = ticket.queue_id {
            if !self
                .user_repo
                .is_queue_member(acting.company_id, target.id, queue_id)
                .await?
            {
                return Err(DomainError::UserNotInQueue);
            }
        }

        let transition = ticket.assign_to(target.id)?;
        let ticket = commit_transition(self.ticket_repo.as_ref(), ticket, transition).await?;
        info!(ticket_id = %ticket.id, user_id = %user_id, by = %acting.id, "Ticket assigned");
        Ok(ticket)
    }

    async fn find_queue(&self, company_id: Uuid, id: Uuid) -> Result<Queue, DomainError> {
        self.queue_repo
            .find_by_id(company_id, id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::Queue))
    }
}
