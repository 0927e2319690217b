// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use crate::domain::models::user::AuthUser;
use crate::presentation::errors::AppError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// 当前会话用户
///
/// 由认证中间件写入请求扩展；路由未经过认证中间件时返回 401
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub AuthUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .map(CurrentUser)
            .ok_or_else(|| DomainError::InvalidToken.into())
    }
}
