// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 工单状态
///
/// 状态转换遵循以下流程：
/// Pending → Open → Closed，Closed 在收到新的客户消息后回到 Pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// 待分配，处于队列的路由池中
    #[default]
    Pending,
    /// 已分配给坐席或队列
    Open,
    /// 已解决
    Closed,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TicketStatus::Pending => write!(f, "pending"),
            TicketStatus::Open => write!(f, "open"),
            TicketStatus::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for TicketStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TicketStatus::Pending),
            "open" => Ok(TicketStatus::Open),
            "closed" => Ok(TicketStatus::Closed),
            _ => Err(()),
        }
    }
}

/// 工单实体
///
/// 客户与公司坐席之间的一次会话。除路由信息外还保存自动化上下文
/// （流程、机器人、集成），结束工单时这些上下文会被停止。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub company_id: Uuid,
    pub contact_id: Uuid,
    /// 当前负责的坐席
    pub user_id: Option<Uuid>,
    /// 当前所在队列
    pub queue_id: Option<Uuid>,
    /// 通道连接
    pub whatsapp_id: Option<Uuid>,
    pub status: TicketStatus,
    pub unread_messages: i32,
    /// 最近一条公开消息的预览
    pub last_message: String,
    pub flow_campaign_id: Option<Uuid>,
    pub flow_step_id: Option<String>,
    pub flow_context: Option<serde_json::Value>,
    pub flow_stopped: bool,
    pub typebot_session_id: Option<String>,
    pub typebot_status: bool,
    pub use_integration: bool,
    pub integration_id: Option<Uuid>,
    pub prompt_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// 工单路由快照，条件更新以它作为比较基准
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketRouting {
    pub status: TicketStatus,
    pub queue_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

/// 未读计数的变化方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreadUpdate {
    Keep,
    Reset,
    Increment,
}

/// 工单状态转换
///
/// 由工单模型根据当前状态计算得出，仓库以 `from` 为条件执行一次
/// 原子更新；条件不满足说明工单已被并发修改。
#[derive(Debug, Clone, PartialEq)]
pub struct TicketTransition {
    pub ticket_id: Uuid,
    pub company_id: Uuid,
    /// 指标标签
    pub kind: &'static str,
    pub from: TicketRouting,
    pub to: TicketRouting,
    pub unread: UnreadUpdate,
    /// 需要写入的结束时间
    pub closed_at: Option<DateTime<Utc>>,
    /// 是否停止自动化流程
    pub stop_automation: bool,
}

/// 新建工单参数
#[derive(Debug, Clone, Default)]
pub struct NewTicket {
    pub company_id: Uuid,
    pub contact_id: Uuid,
    pub queue_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub whatsapp_id: Option<Uuid>,
}

impl Ticket {
    /// 创建工单
    ///
    /// 没有队列和坐席时初始状态为 Pending，否则为 Open
    pub fn new(params: NewTicket) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            company_id: params.company_id,
            contact_id: params.contact_id,
            user_id: params.user_id,
            queue_id: params.queue_id,
            whatsapp_id: params.whatsapp_id,
            status: Self::initial_status(params.queue_id, params.user_id),
            unread_messages: 0,
            last_message: String::new(),
            flow_campaign_id: None,
            flow_step_id: None,
            flow_context: None,
            flow_stopped: false,
            typebot_session_id: None,
            typebot_status: false,
            use_integration: false,
            integration_id: None,
            prompt_id: None,
            created_at: now,
            updated_at: now,
            closed_at: None,
        }
    }

    pub fn initial_status(queue_id: Option<Uuid>, user_id: Option<Uuid>) -> TicketStatus {
        if queue_id.is_none() && user_id.is_none() {
            TicketStatus::Pending
        } else {
            TicketStatus::Open
        }
    }

    pub fn routing(&self) -> TicketRouting {
        TicketRouting {
            status: self.status,
            queue_id: self.queue_id,
            user_id: self.user_id,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.status == TicketStatus::Closed
    }

    fn transition(&self, kind: &'static str, to: TicketRouting, unread: UnreadUpdate) -> TicketTransition {
        TicketTransition {
            ticket_id: self.id,
            company_id: self.company_id,
            kind,
            from: self.routing(),
            to,
            unread,
            closed_at: None,
            stop_automation: false,
        }
    }

    fn ensure_not_closed(&self, action: &'static str) -> Result<(), DomainError> {
        if self.is_closed() {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                action,
            });
        }
        Ok(())
    }

    /// 转入队列：清空坐席并回到路由池
    pub fn transfer_to_queue(&self, queue_id: Uuid) -> Result<TicketTransition, DomainError> {
        self.ensure_not_closed("transfer")?;
        Ok(self.transition(
            "transfer_queue",
            TicketRouting {
                status: TicketStatus::Pending,
                queue_id: Some(queue_id),
                user_id: None,
            },
            UnreadUpdate::Keep,
        ))
    }

    /// 分配给坐席，保留当前队列
    pub fn assign_to(&self, user_id: Uuid) -> Result<TicketTransition, DomainError> {
        self.ensure_not_closed("transfer")?;
        Ok(self.transition(
            "assign",
            TicketRouting {
                status: TicketStatus::Open,
                queue_id: self.queue_id,
                user_id: Some(user_id),
            },
            UnreadUpdate::Keep,
        ))
    }

    /// 结束工单：未读清零并停止自动化流程
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<TicketTransition, DomainError> {
        self.ensure_not_closed("resolve")?;
        let mut transition = self.transition(
            "resolve",
            TicketRouting {
                status: TicketStatus::Closed,
                ..self.routing()
            },
            UnreadUpdate::Reset,
        );
        transition.closed_at = Some(now);
        transition.stop_automation = true;
        Ok(transition)
    }

    /// 收到客户消息
    ///
    /// 已结束的工单重新打开为 Pending 并释放坐席，保留队列；
    /// 其他状态只增加未读计数。
    pub fn receive_inbound(&self) -> TicketTransition {
        if self.is_closed() {
            self.transition(
                "reopen",
                TicketRouting {
                    status: TicketStatus::Pending,
                    queue_id: self.queue_id,
                    user_id: None,
                },
                UnreadUpdate::Increment,
            )
        } else {
            self.transition("inbound", self.routing(), UnreadUpdate::Increment)
        }
    }

    /// 坐席已读
    pub fn mark_read(&self) -> TicketTransition {
        self.transition("read", self.routing(), UnreadUpdate::Reset)
    }

    /// 在内存中应用转换，结果与仓库的条件更新一致
    pub fn apply(&mut self, transition: &TicketTransition, now: DateTime<Utc>) {
        self.status = transition.to.status;
        self.queue_id = transition.to.queue_id;
        self.user_id = transition.to.user_id;
        match transition.unread {
            UnreadUpdate::Keep => {}
            UnreadUpdate::Reset => self.unread_messages = 0,
            UnreadUpdate::Increment => self.unread_messages += 1,
        }
        if transition.closed_at.is_some() {
            self.closed_at = transition.closed_at;
        }
        if transition.stop_automation {
            self.flow_stopped = true;
            self.typebot_status = false;
        }
        self.updated_at = now;
    }
}

/// 工单列表过滤条件
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub queue_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}
