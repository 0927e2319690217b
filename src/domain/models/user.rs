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

/// 坐席角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    Admin,
    #[default]
    User,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Profile::Admin => write!(f, "admin"),
            Profile::User => write!(f, "user"),
        }
    }
}

impl FromStr for Profile {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Profile::Admin),
            "user" => Ok(Profile::User),
            _ => Err(()),
        }
    }
}

/// 坐席账号
///
/// `token_version` 每次强制下线、注销、停用或修改密码时递增，
/// 之前签发的所有令牌随即失效。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub profile: Profile,
    pub token_version: i32,
    pub active: bool,
    /// 平台运营方账号，可跨租户管理套餐和公司
    pub super_admin: bool,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        company_id: Uuid,
        name: String,
        email: String,
        password_hash: String,
        profile: Profile,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            company_id,
            name,
            email: normalize_email(&email),
            password_hash,
            profile,
            token_version: 0,
            active: true,
            super_admin: false,
            last_seen_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 邮箱统一转为小写并去掉首尾空白
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 已认证的会话身份
///
/// 由认证中间件从令牌和数据库中的用户记录解析得到，随请求向下传递。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub company_id: Uuid,
    pub profile: Profile,
    pub token_version: i32,
    pub super_admin: bool,
}

impl AuthUser {
    /// 要求至少具备 `required` 角色，超级管理员视同管理员
    pub fn authorize(&self, required: Profile) -> Result<(), DomainError> {
        match required {
            Profile::User => Ok(()),
            Profile::Admin if self.profile == Profile::Admin || self.super_admin => Ok(()),
            Profile::Admin => Err(DomainError::InsufficientProfile),
        }
    }

    pub fn authorize_super_admin(&self) -> Result<(), DomainError> {
        if self.super_admin {
            Ok(())
        } else {
            Err(DomainError::InsufficientProfile)
        }
    }
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            company_id: user.company_id,
            profile: user.profile,
            token_version: user.token_version,
            super_admin: user.super_admin,
        }
    }
}
