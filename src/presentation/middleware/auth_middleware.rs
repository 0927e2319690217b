// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use crate::domain::services::auth_service::AuthService;
use crate::presentation::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// 冻结公司仍可调用的写接口
const BLOCKED_COMPANY_ALLOWED: &[&str] = &["/auth/logout", "/invoices/checkout"];

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    pub auth: Arc<AuthService>,
}

/// 认证中间件
///
/// 校验 `Authorization: Bearer <jwt>`，拒绝冻结公司的写请求，
/// 更新最后活跃时间，并把 `AuthUser` 放入请求扩展
///
/// # 返回值
///
/// * `Ok(Response)` - 认证成功的响应
/// * `Err(AppError)` - 401 令牌无效或已失效，402 公司已冻结
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();
    debug!("AuthMiddleware processing path: {}", path);

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(DomainError::InvalidToken)?;

    let user = state.auth.authenticate(token).await?;

    let is_write = !matches!(*req.method(), Method::GET | Method::HEAD | Method::OPTIONS);
    if is_write && !BLOCKED_COMPANY_ALLOWED.contains(&path.as_str()) {
        state.auth.ensure_can_write(&user).await?;
    }

    if let Err(e) = state.auth.touch_last_seen(&user).await {
        warn!(user_id = %user.id, "Failed to update last seen: {}", e);
    }

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
#[path = "auth_middleware_test.rs"]
mod auth_middleware_test;
