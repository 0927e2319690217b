// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::{DomainError, EntityKind};
use crate::domain::models::message::{AckLevel, NewMessage};
use crate::domain::models::plan::Feature;
use crate::domain::models::schedule::{Schedule, ScheduleStatus};
use crate::domain::models::user::AuthUser;
use crate::domain::repositories::schedule_repository::ScheduleRepository;
use crate::domain::repositories::ticket_repository::TicketRepository;
use crate::domain::services::message_service::MessageService;
use crate::domain::services::plan_service::PlanService;
use crate::domain::services::tenant_guard::load_ticket;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 一轮发送的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub sent: usize,
    pub failed: usize,
}

/// 定时发送服务
pub struct ScheduleService {
    schedule_repo: Arc<dyn ScheduleRepository>,
    ticket_repo: Arc<dyn TicketRepository>,
    messages: Arc<MessageService>,
    plan_service: Arc<PlanService>,
}

impl ScheduleService {
    pub fn new(
        schedule_repo: Arc<dyn ScheduleRepository>,
        ticket_repo: Arc<dyn TicketRepository>,
        messages: Arc<MessageService>,
        plan_service: Arc<PlanService>,
    ) -> Self {
        Self {
            schedule_repo,
            ticket_repo,
            messages,
            plan_service,
        }
    }

    pub async fn create_schedule(
        &self,
        acting: &AuthUser,
        ticket_id: Uuid,
        body: String,
        send_at: DateTime<Utc>,
    ) -> Result<Schedule, DomainError> {
        self.plan_service
            .require_feature(acting.company_id, Feature::Schedules)
            .await?;
        let ticket = load_ticket(self.ticket_repo.as_ref(), acting.company_id, ticket_id).await?;

        let schedule = Schedule::new(
            ticket.company_id,
            ticket.id,
            ticket.contact_id,
            Some(acting.id),
            body,
            send_at,
            Utc::now(),
        )?;
        let schedule = self.schedule_repo.create(&schedule).await?;
        info!(schedule_id = %schedule.id, ticket_id = %ticket.id, send_at = %send_at, "Message scheduled");
        Ok(schedule)
    }

    pub async fn list_schedules(&self, acting: &AuthUser, ticket_id: Uuid) -> Result<Vec<Schedule>, DomainError> {
        let ticket = load_ticket(self.ticket_repo.as_ref(), acting.company_id, ticket_id).await?;
        Ok(self
            .schedule_repo
            .list_for_ticket(ticket.company_id, ticket.id)
            .await?)
    }

    /// 只能删除尚未发送的任务
    pub async fn delete_schedule(&self, acting: &AuthUser, id: Uuid) -> Result<(), DomainError> {
        if !self.schedule_repo.delete_pending(acting.company_id, id).await? {
            return Err(DomainError::NotFound(EntityKind::Schedule));
        }
        Ok(())
    }

    /// 发送到期的任务
    ///
    /// 每个任务先以条件更新认领为 Processing，只有认领成功的一方才会发送，
    /// 并发的发送轮次不会重复投递。单个任务出错只记为 Failed，不影响同批其余任务。
    /// 通道发送失败的任务记为 Failed，消息本身仍保留在工单中。
    pub async fn dispatch_due(&self, now: DateTime<Utc>, limit: u64) -> Result<DispatchStats, DomainError> {
        let mut stats = DispatchStats::default();

        for schedule in self.schedule_repo.find_due(now, limit).await? {
            match self.schedule_repo.claim(schedule.id, now).await {
                Ok(true) => {}
                Ok(false) => {
                    debug!(schedule_id = %schedule.id, "Schedule already claimed");
                    continue;
                }
                Err(e) => {
                    warn!(schedule_id = %schedule.id, error = %e, "Failed to claim schedule");
                    continue;
                }
            }

            let status = match self.send_one(&schedule).await {
                Ok(status) => status,
                Err(e) => {
                    warn!(schedule_id = %schedule.id, error = %e, "Scheduled message failed");
                    ScheduleStatus::Failed
                }
            };

            match self.schedule_repo.finish(schedule.id, status, now).await {
                Ok(true) => match status {
                    ScheduleStatus::Sent => stats.sent += 1,
                    _ => stats.failed += 1,
                },
                Ok(false) => {}
                Err(e) => {
                    warn!(schedule_id = %schedule.id, error = %e, "Failed to record schedule outcome");
                }
            }
        }

        Ok(stats)
    }

    async fn send_one(&self, schedule: &Schedule) -> Result<ScheduleStatus, DomainError> {
        let Some(ticket) = self
            .ticket_repo
            .find_by_id(schedule.company_id, schedule.ticket_id)
            .await?
        else {
            warn!(schedule_id = %schedule.id, "Scheduled ticket no longer exists");
            return Ok(ScheduleStatus::Failed);
        };

        let message = self
            .messages
            .post_outbound(
                &ticket,
                NewMessage {
                    body: schedule.body.clone(),
                    ..Default::default()
                },
            )
            .await?;
        Ok(if message.ack >= AckLevel::Sent {
            ScheduleStatus::Sent
        } else {
            ScheduleStatus::Failed
        })
    }
}
