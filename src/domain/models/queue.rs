// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 队列（部门）
///
/// 工单同一时刻最多归属一个队列；坐席与队列是多对多关系。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Queue {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    /// 界面展示颜色，例如 `#10b981`
    pub color: String,
    pub greeting_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Queue {
    pub fn new(
        company_id: Uuid,
        name: String,
        color: String,
        greeting_message: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            company_id,
            name,
            color,
            greeting_message,
            created_at: now,
            updated_at: now,
        }
    }
}
