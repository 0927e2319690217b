// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub const BUSINESS_HOURS_ENABLED: &str = "businessHoursEnabled";
pub const BUSINESS_HOURS_START: &str = "businessHoursStart";
pub const BUSINESS_HOURS_END: &str = "businessHoursEnd";
pub const OUT_OF_HOURS_MESSAGE: &str = "outOfHoursMessage";
/// 相对 UTC 的分钟偏移，例如 `-180`
pub const TIMEZONE_OFFSET_MINUTES: &str = "timezoneOffsetMinutes";
pub const AI_ENABLED: &str = "aiEnabled";
pub const AI_PROMPT: &str = "aiPrompt";

/// UTC 偏移的合法范围（分钟），覆盖 UTC-14:00 到 UTC+14:00
pub const MAX_TIMEZONE_OFFSET_MINUTES: i64 = 14 * 60;

const BOOL_VALUES: [&str; 8] = ["true", "false", "enabled", "disabled", "1", "0", "on", "off"];

/// 校验有类型的设置键，其他键按自由文本接受
pub fn validate_value(key: &str, value: &str) -> Result<(), String> {
    let value = value.trim();
    match key {
        BUSINESS_HOURS_ENABLED | AI_ENABLED => {
            if !BOOL_VALUES.contains(&value.to_ascii_lowercase().as_str()) {
                return Err(format!("{} must be a boolean", key));
            }
        }
        BUSINESS_HOURS_START | BUSINESS_HOURS_END => {
            if NaiveTime::parse_from_str(value, "%H:%M").is_err() {
                return Err(format!("{} must use the HH:MM format", key));
            }
        }
        TIMEZONE_OFFSET_MINUTES => match value.parse::<i64>() {
            Ok(offset) if (-MAX_TIMEZONE_OFFSET_MINUTES..=MAX_TIMEZONE_OFFSET_MINUTES).contains(&offset) => {}
            _ => {
                return Err(format!(
                    "{} must be an integer between -{} and {}",
                    key, MAX_TIMEZONE_OFFSET_MINUTES, MAX_TIMEZONE_OFFSET_MINUTES
                ))
            }
        },
        _ => {}
    }
    Ok(())
}

/// 键值设置，`company_id` 为空时是全局默认值
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// 某个租户的设置快照
///
/// 每次请求或自动化决策加载一次后向下传递，公司级记录覆盖全局记录。
#[derive(Debug, Clone, Default)]
pub struct TenantSettings {
    values: HashMap<String, String>,
}

impl TenantSettings {
    /// 合并设置记录，公司级记录优先于全局记录
    pub fn from_rows(rows: Vec<Setting>) -> Self {
        let mut values = HashMap::new();
        let (company, global): (Vec<_>, Vec<_>) =
            rows.into_iter().partition(|s| s.company_id.is_some());
        for setting in global.into_iter().chain(company) {
            values.insert(setting.key, setting.value);
        }
        Self { values }
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// 接受 `true`/`enabled`/`1`/`on`，其余都视为关闭
    pub fn get_bool(&self, key: &str) -> bool {
        matches!(
            self.get_string(key).map(|v| v.trim().to_ascii_lowercase()),
            Some(ref v) if v == "true" || v == "enabled" || v == "1" || v == "on"
        )
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get_string(key).and_then(|v| v.trim().parse().ok())
    }

    /// 时区偏移（分钟），超出范围的历史值被截断到合法区间
    pub fn timezone_offset_minutes(&self) -> i64 {
        self.get_i64(TIMEZONE_OFFSET_MINUTES)
            .unwrap_or(0)
            .clamp(-MAX_TIMEZONE_OFFSET_MINUTES, MAX_TIMEZONE_OFFSET_MINUTES)
    }

    /// 解析 `HH:MM` 格式的时间
    pub fn get_time(&self, key: &str) -> Option<NaiveTime> {
        self.get_string(key)
            .and_then(|v| NaiveTime::parse_from_str(v.trim(), "%H:%M").ok())
    }
}
