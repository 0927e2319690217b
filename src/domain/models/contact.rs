// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static NON_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").expect("Failed to compile digits regex"));

const GROUP_SUFFIX: &str = "@g.us";

/// 联系人（外部客户）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    /// 通道地址，仅包含数字
    pub number: String,
    pub email: Option<String>,
    pub is_group: bool,
    /// ERP 客户编号
    pub ixc_id: Option<String>,
    pub cpf: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(company_id: Uuid, name: String, address: &ChannelAddress) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            company_id,
            name,
            number: address.number.clone(),
            email: None,
            is_group: address.is_group,
            ixc_id: None,
            cpf: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 规范化后的通道地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelAddress {
    pub number: String,
    pub is_group: bool,
}

impl ChannelAddress {
    /// 解析通道原始地址
    ///
    /// 去掉 `@` 之后的域部分和所有非数字字符；以 `@g.us` 结尾的地址是群组。
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        let is_group = raw.ends_with(GROUP_SUFFIX);
        let local = raw.split('@').next().unwrap_or_default();
        let number = NON_DIGITS.replace_all(local, "").into_owned();

        if number.is_empty() {
            return Err(DomainError::Validation(format!(
                "invalid contact number: {}",
                raw
            )));
        }

        Ok(Self { number, is_group })
    }
}
