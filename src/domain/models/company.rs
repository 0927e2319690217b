// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 公司（租户）实体
///
/// 多租户隔离的根节点，其余所有租户数据都通过 `company_id` 归属于某个公司。
/// `status` 为 `false` 时公司被冻结，所有写操作都会被拒绝。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// 是否处于启用状态，由账单和催缴任务切换
    pub status: bool,
    /// 当前账期的到期时间
    pub due_date: Option<DateTime<Utc>>,
    pub plan_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn new(name: String, plan_id: Uuid, due_date: Option<DateTime<Utc>>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email: None,
            phone: None,
            status: true,
            due_date,
            plan_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// 写操作前的检查
    pub fn ensure_writable(&self) -> Result<(), DomainError> {
        if self.status {
            Ok(())
        } else {
            Err(DomainError::CompanyBlocked)
        }
    }

    /// 付款确认后的新到期时间：从当前到期时间与 `now` 中较晚的一个起算
    pub fn renewed_due_date(&self, now: DateTime<Utc>, renewal_days: i64) -> DateTime<Utc> {
        let base = match self.due_date {
            Some(due) if due > now => due,
            _ => now,
        };
        base + Duration::days(renewal_days)
    }

    /// 是否已超过宽限期
    pub fn is_past_grace(&self, now: DateTime<Utc>, grace_days: i64) -> bool {
        match self.due_date {
            Some(due) => due + Duration::days(grace_days) < now,
            None => false,
        }
    }
}
