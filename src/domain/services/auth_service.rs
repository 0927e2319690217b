// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::{DomainError, EntityKind};
use crate::domain::models::user::{normalize_email, AuthUser, Profile, User};
use crate::domain::repositories::company_repository::CompanyRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::password_service::PasswordService;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// 令牌载荷
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub id: Uuid,
    pub company_id: Uuid,
    pub profile: Profile,
    pub token_version: i32,
    pub super_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

/// 登录结果
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub user: User,
}

/// 认证服务
///
/// 负责登录、令牌签发与校验、会话失效。令牌本身是无状态的，
/// 每次请求都会与数据库中的 `token_version` 比对，因此递增版本号
/// 即可让该用户之前签发的所有令牌失效。
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    company_repo: Arc<dyn CompanyRepository>,
    passwords: PasswordService,
    jwt_secret: String,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        company_repo: Arc<dyn CompanyRepository>,
        passwords: PasswordService,
        jwt_secret: String,
        token_ttl_hours: i64,
    ) -> Self {
        Self {
            user_repo,
            company_repo,
            passwords,
            jwt_secret,
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }

    pub fn passwords(&self) -> &PasswordService {
        &self.passwords
    }

    /// 登录
    ///
    /// # 参数
    ///
    /// * `email` - 登录邮箱，不区分大小写
    /// * `password` - 明文密码
    /// * `company_id` - 同一邮箱存在于多个公司时必须提供
    ///
    /// # 返回值
    ///
    /// * `Ok(LoginResult)` - 令牌和用户信息
    /// * `Err(DomainError::InvalidCredentials)` - 邮箱不存在、用户已停用或密码错误
    /// * `Err(DomainError::CompanyRequired)` - 需要指定公司
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        company_id: Option<Uuid>,
    ) -> Result<LoginResult, DomainError> {
        let email = normalize_email(email);
        let user = match company_id {
            Some(company_id) => self.user_repo.find_by_email(company_id, &email).await?,
            None => {
                let mut candidates = self.user_repo.find_by_email_any_company(&email).await?;
                if candidates.len() > 1 {
                    return Err(DomainError::CompanyRequired);
                }
                candidates.pop()
            }
        };

        let user = match user {
            Some(user) if user.active => user,
            _ => return Err(auth_failure("invalid_credentials", DomainError::InvalidCredentials)),
        };

        if !self.passwords.verify(password, &user.password_hash).await? {
            return Err(auth_failure("invalid_credentials", DomainError::InvalidCredentials));
        }

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, company_id = %user.company_id, "User logged in");

        Ok(LoginResult { token, user })
    }

    /// 为用户签发令牌
    pub fn issue_token(&self, user: &User) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = Claims {
            id: user.id,
            company_id: user.company_id,
            profile: user.profile,
            token_version: user.token_version,
            super_admin: user.super_admin,
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| DomainError::Internal(format!("token encoding failed: {}", e)))
    }

    /// 校验令牌并解析出会话身份
    ///
    /// 令牌中的 `token_version` 必须与用户当前版本一致，否则返回
    /// `DomainError::StaleSession`。
    pub async fn authenticate(&self, token: &str) -> Result<AuthUser, DomainError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| {
            warn!("Rejected bearer token: {}", e);
            auth_failure("invalid_token", DomainError::InvalidToken)
        })?
        .claims;

        let user = self
            .user_repo
            .find_by_id(claims.company_id, claims.id)
            .await?
            .ok_or_else(|| auth_failure("unknown_user", DomainError::InvalidToken))?;

        if user.token_version != claims.token_version || !user.active {
            return Err(auth_failure("stale_token", DomainError::StaleSession));
        }

        Ok(AuthUser::from(&user))
    }

    /// 写操作前检查公司是否被冻结，超级管理员不受限制
    pub async fn ensure_can_write(&self, user: &AuthUser) -> Result<(), DomainError> {
        if user.super_admin {
            return Ok(());
        }
        let company = self
            .company_repo
            .find_by_id(user.company_id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::Company))?;
        company.ensure_writable()
    }

    pub async fn touch_last_seen(&self, user: &AuthUser) -> Result<(), DomainError> {
        self.user_repo
            .touch_last_seen(user.company_id, user.id, Utc::now())
            .await?;
        Ok(())
    }

    /// 注销当前用户的全部会话
    pub async fn logout(&self, user: &AuthUser) -> Result<(), DomainError> {
        self.user_repo
            .bump_token_version(user.company_id, user.id)
            .await?;
        info!(user_id = %user.id, "User logged out");
        Ok(())
    }

    /// 管理员强制下线同公司的用户
    pub async fn force_logout(&self, acting: &AuthUser, user_id: Uuid) -> Result<(), DomainError> {
        acting.authorize(Profile::Admin)?;
        if !self
            .user_repo
            .bump_token_version(acting.company_id, user_id)
            .await?
        {
            return Err(DomainError::NotFound(EntityKind::User));
        }
        info!(user_id = %user_id, by = %acting.id, "User sessions revoked");
        Ok(())
    }
}

fn auth_failure(reason: &'static str, err: DomainError) -> DomainError {
    counter!("ispdesk_auth_failures_total", "reason" => reason).increment(1);
    err
}
