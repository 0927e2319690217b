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

/// 套餐实体
///
/// 定义公司可使用的功能开关和容量上限。容量字段为 `0` 时表示不限。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    /// 坐席数量上限
    pub users: i32,
    /// 通道连接数量上限
    pub connections: i32,
    /// 队列数量上限
    pub queues: i32,
    /// 每个账期的价格（分）
    pub amount_cents: i64,
    pub use_campaigns: bool,
    pub use_kanban: bool,
    pub use_open_ai: bool,
    pub use_integrations: bool,
    pub use_schedules: bool,
    pub use_internal_chat: bool,
    pub use_external_api: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建或修改套餐的参数
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanDraft {
    pub name: String,
    pub users: i32,
    pub connections: i32,
    pub queues: i32,
    pub amount_cents: i64,
    pub use_campaigns: bool,
    pub use_kanban: bool,
    pub use_open_ai: bool,
    pub use_integrations: bool,
    pub use_schedules: bool,
    pub use_internal_chat: bool,
    pub use_external_api: bool,
}

/// 套餐功能开关
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "useCampaigns")]
    Campaigns,
    #[serde(rename = "useKanban")]
    Kanban,
    #[serde(rename = "useOpenAi")]
    OpenAi,
    #[serde(rename = "useIntegrations")]
    Integrations,
    #[serde(rename = "useSchedules")]
    Schedules,
    #[serde(rename = "useInternalChat")]
    InternalChat,
    #[serde(rename = "useExternalApi")]
    ExternalApi,
}

impl Feature {
    pub const ALL: [Feature; 7] = [
        Feature::Campaigns,
        Feature::Kanban,
        Feature::OpenAi,
        Feature::Integrations,
        Feature::Schedules,
        Feature::InternalChat,
        Feature::ExternalApi,
    ];
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Feature::Campaigns => write!(f, "useCampaigns"),
            Feature::Kanban => write!(f, "useKanban"),
            Feature::OpenAi => write!(f, "useOpenAi"),
            Feature::Integrations => write!(f, "useIntegrations"),
            Feature::Schedules => write!(f, "useSchedules"),
            Feature::InternalChat => write!(f, "useInternalChat"),
            Feature::ExternalApi => write!(f, "useExternalApi"),
        }
    }
}

impl FromStr for Feature {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .iter()
            .copied()
            .find(|feature| feature.to_string() == s)
            .ok_or(())
    }
}

/// 受套餐容量限制的资源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Users,
    Connections,
    Queues,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Resource::Users => write!(f, "users"),
            Resource::Connections => write!(f, "connections"),
            Resource::Queues => write!(f, "queues"),
        }
    }
}

impl Plan {
    pub fn new(draft: PlanDraft) -> Self {
        let now = Utc::now();
        let mut plan = Self {
            id: Uuid::new_v4(),
            name: String::new(),
            users: 0,
            connections: 0,
            queues: 0,
            amount_cents: 0,
            use_campaigns: false,
            use_kanban: false,
            use_open_ai: false,
            use_integrations: false,
            use_schedules: false,
            use_internal_chat: false,
            use_external_api: false,
            created_at: now,
            updated_at: now,
        };
        plan.apply(draft);
        plan
    }

    /// 用新参数覆盖套餐内容，ID 和创建时间保持不变
    pub fn apply(&mut self, draft: PlanDraft) {
        self.name = draft.name;
        self.users = draft.users;
        self.connections = draft.connections;
        self.queues = draft.queues;
        self.amount_cents = draft.amount_cents;
        self.use_campaigns = draft.use_campaigns;
        self.use_kanban = draft.use_kanban;
        self.use_open_ai = draft.use_open_ai;
        self.use_integrations = draft.use_integrations;
        self.use_schedules = draft.use_schedules;
        self.use_internal_chat = draft.use_internal_chat;
        self.use_external_api = draft.use_external_api;
        self.updated_at = Utc::now();
    }

    /// 判断套餐是否开通指定功能
    pub fn has_feature(&self, feature: Feature) -> bool {
        match feature {
            Feature::Campaigns => self.use_campaigns,
            Feature::Kanban => self.use_kanban,
            Feature::OpenAi => self.use_open_ai,
            Feature::Integrations => self.use_integrations,
            Feature::Schedules => self.use_schedules,
            Feature::InternalChat => self.use_internal_chat,
            Feature::ExternalApi => self.use_external_api,
        }
    }

    /// 已开通的功能列表，顺序固定
    pub fn enabled_features(&self) -> Vec<Feature> {
        Feature::ALL
            .iter()
            .copied()
            .filter(|feature| self.has_feature(*feature))
            .collect()
    }

    pub fn cap(&self, resource: Resource) -> i32 {
        match resource {
            Resource::Users => self.users,
            Resource::Connections => self.connections,
            Resource::Queues => self.queues,
        }
    }

    /// 检查在已有 `current` 个资源的情况下能否再创建一个
    ///
    /// 上限为 `0` 时永远不会阻止创建
    pub fn check_capacity(&self, resource: Resource, current: u64) -> Result<(), DomainError> {
        let cap = self.cap(resource);
        if cap > 0 && current >= cap as u64 {
            return Err(DomainError::PlanLimitExceeded(resource));
        }
        Ok(())
    }
}
