// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::setting::{
    TenantSettings, AI_ENABLED, AI_PROMPT, BUSINESS_HOURS_ENABLED, BUSINESS_HOURS_END,
    BUSINESS_HOURS_START, OUT_OF_HOURS_MESSAGE,
};
use chrono::{DateTime, Duration, NaiveTime, Utc};

/// 自动回复决策
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoReply {
    /// 不回复
    None,
    /// 非工作时间，发送固定消息
    OutOfHours(String),
    /// 交给 AI 生成回复，携带系统提示词
    Ai { system_prompt: String },
}

impl AutoReply {
    /// 指标标签
    pub fn kind(&self) -> &'static str {
        match self {
            AutoReply::None => "none",
            AutoReply::OutOfHours(_) => "out_of_hours",
            AutoReply::Ai { .. } => "ai",
        }
    }
}

/// 根据租户设置和当前时间决定是否自动回复
///
/// 工作时间判断优先；在工作时间内且套餐和设置都开启 AI 时才交给 AI。
pub fn decide(settings: &TenantSettings, plan_allows_ai: bool, now: DateTime<Utc>) -> AutoReply {
    if settings.get_bool(BUSINESS_HOURS_ENABLED) && !within_business_hours(settings, now) {
        return match settings.get_string(OUT_OF_HOURS_MESSAGE) {
            Some(message) => AutoReply::OutOfHours(message.to_string()),
            None => AutoReply::None,
        };
    }

    if plan_allows_ai && settings.get_bool(AI_ENABLED) {
        return AutoReply::Ai {
            system_prompt: settings.get_string(AI_PROMPT).unwrap_or_default().to_string(),
        };
    }

    AutoReply::None
}

/// 工作时间缺省或配置错误时视为全天工作
fn within_business_hours(settings: &TenantSettings, now: DateTime<Utc>) -> bool {
    let (start, end) = match (
        settings.get_time(BUSINESS_HOURS_START),
        settings.get_time(BUSINESS_HOURS_END),
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => return true,
    };

    let offset = Duration::minutes(settings.timezone_offset_minutes());
    let local: NaiveTime = match now.checked_add_signed(offset) {
        Some(local) => local.time(),
        None => return true,
    };

    if start <= end {
        local >= start && local < end
    } else {
        // 跨午夜，例如 22:00-06:00
        local >= start || local < end
    }
}
