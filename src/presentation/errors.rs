// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::errors::DomainError;
use crate::utils::errors::RepositoryError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，统一渲染为 `{"success": false, "error": "<code>"}`，
/// 内部细节只写入日志
#[derive(Debug)]
pub struct AppError(anyhow::Error);

/// 领域错误对应的 HTTP 状态码
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::ForbiddenTenant
        | DomainError::InsufficientProfile
        | DomainError::PlanLimitExceeded(_)
        | DomainError::FeatureDisabled(_) => StatusCode::FORBIDDEN,
        DomainError::InvalidToken
        | DomainError::StaleSession
        | DomainError::InvalidCredentials
        | DomainError::InvalidSignature => StatusCode::UNAUTHORIZED,
        DomainError::CompanyRequired | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::CompanyBlocked => StatusCode::PAYMENT_REQUIRED,
        DomainError::PlanInUse | DomainError::TicketConflict | DomainError::AlreadyExists(_) => {
            StatusCode::CONFLICT
        }
        DomainError::UserNotInQueue | DomainError::InvalidTransition { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DomainError::ExternalDependency(_) => StatusCode::BAD_GATEWAY,
        DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Repository(repo) => repository_status(repo),
    }
}

fn repository_status(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict => StatusCode::CONFLICT,
        RepositoryError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl AppError {
    fn classify(&self) -> (StatusCode, &'static str) {
        if let Some(err) = self.0.downcast_ref::<DomainError>() {
            return (status_for(err), err.code());
        }
        if let Some(err) = self.0.downcast_ref::<RepositoryError>() {
            let code = match err {
                RepositoryError::NotFound => "ERR_NOT_FOUND",
                RepositoryError::Conflict => "ERR_CONFLICT",
                RepositoryError::Database(_) => "ERR_INTERNAL",
            };
            return (repository_status(err), code);
        }
        if self.0.downcast_ref::<ValidationErrors>().is_some() {
            return (StatusCode::BAD_REQUEST, "ERR_VALIDATION");
        }
        (StatusCode::INTERNAL_SERVER_ERROR, "ERR_INTERNAL")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();
        if status.is_server_error() {
            error!("Request failed: {:#}", self.0);
        }

        let body = Json(json!({ "success": false, "error": code }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
