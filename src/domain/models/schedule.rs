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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    #[default]
    Pending,
    /// 已被某个发送轮次认领，正在发送
    Processing,
    Sent,
    Failed,
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScheduleStatus::Pending => write!(f, "pending"),
            ScheduleStatus::Processing => write!(f, "processing"),
            ScheduleStatus::Sent => write!(f, "sent"),
            ScheduleStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for ScheduleStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ScheduleStatus::Pending),
            "processing" => Ok(ScheduleStatus::Processing),
            "sent" => Ok(ScheduleStatus::Sent),
            "failed" => Ok(ScheduleStatus::Failed),
            _ => Err(()),
        }
    }
}

/// 定时发送任务
///
/// 到达 `send_at` 后由后台任务作为坐席消息发送到对应工单。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: Uuid,
    pub company_id: Uuid,
    pub ticket_id: Uuid,
    pub contact_id: Uuid,
    pub user_id: Option<Uuid>,
    pub body: String,
    pub send_at: DateTime<Utc>,
    pub status: ScheduleStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    /// 创建定时任务，`send_at` 必须晚于 `now`
    pub fn new(
        company_id: Uuid,
        ticket_id: Uuid,
        contact_id: Uuid,
        user_id: Option<Uuid>,
        body: String,
        send_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if send_at <= now {
            return Err(DomainError::Validation(
                "sendAt must be in the future".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            company_id,
            ticket_id,
            contact_id,
            user_id,
            body,
            send_at,
            status: ScheduleStatus::Pending,
            sent_at: None,
            created_at: now,
            updated_at: now,
        })
    }
}
