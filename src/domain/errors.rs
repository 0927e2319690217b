// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::plan::{Feature, Resource};
use crate::domain::models::ticket::TicketStatus;
use crate::utils::errors::RepositoryError;
use std::fmt;
use thiserror::Error;

/// 实体种类
///
/// 用于生成 `ERR_NO_<ENTITY>_FOUND` 形式的错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Company,
    Plan,
    User,
    Queue,
    Contact,
    Connection,
    Ticket,
    Message,
    Invoice,
    Schedule,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            EntityKind::Company => "company",
            EntityKind::Plan => "plan",
            EntityKind::User => "user",
            EntityKind::Queue => "queue",
            EntityKind::Contact => "contact",
            EntityKind::Connection => "connection",
            EntityKind::Ticket => "ticket",
            EntityKind::Message => "message",
            EntityKind::Invoice => "invoice",
            EntityKind::Schedule => "schedule",
        };
        write!(f, "{}", name)
    }
}

/// 领域错误类型
///
/// 每个变体都对应一个稳定的机器可读错误码，由表示层渲染为
/// `{"error": "<code>"}`，不暴露内部细节。
#[derive(Error, Debug)]
pub enum DomainError {
    /// 实体不存在或不属于当前租户
    #[error("{0} not found")]
    NotFound(EntityKind),

    /// 跨租户访问
    #[error("resource belongs to another tenant")]
    ForbiddenTenant,

    /// 角色权限不足
    #[error("insufficient profile")]
    InsufficientProfile,

    /// 令牌缺失、格式错误或签名无效
    #[error("invalid or missing token")]
    InvalidToken,

    /// 令牌版本落后于用户当前版本
    #[error("session token is stale")]
    StaleSession,

    /// 登录失败
    #[error("invalid credentials")]
    InvalidCredentials,

    /// 同一邮箱存在于多个公司，需要指定公司
    #[error("company id required to disambiguate login")]
    CompanyRequired,

    /// 公司已被冻结，禁止写操作
    #[error("company is blocked")]
    CompanyBlocked,

    /// 超出套餐容量
    #[error("plan limit exceeded for {0}")]
    PlanLimitExceeded(Resource),

    /// 套餐未开通该功能
    #[error("feature {0} is not enabled for this company")]
    FeatureDisabled(Feature),

    /// 套餐仍被公司引用
    #[error("plan is still referenced by companies")]
    PlanInUse,

    /// 目标坐席不属于工单当前队列
    #[error("user is not a member of the ticket queue")]
    UserNotInQueue,

    /// 工单在读取后被并发修改
    #[error("ticket was modified concurrently")]
    TicketConflict,

    /// 非法状态转换
    #[error("cannot {action} a ticket in status {from}")]
    InvalidTransition {
        from: TicketStatus,
        action: &'static str,
    },

    /// 唯一约束冲突，携带完整错误码，例如 `ERR_EMAIL_ALREADY_EXISTS`
    #[error("duplicate value: {0}")]
    AlreadyExists(&'static str),

    /// Webhook 签名无效
    #[error("invalid signature")]
    InvalidSignature,

    /// 输入校验失败
    #[error("validation error: {0}")]
    Validation(String),

    /// 调用方显式请求的外部依赖失败
    #[error("external dependency failed: {0}")]
    ExternalDependency(String),

    /// 内部错误，细节只写入日志
    #[error("internal error: {0}")]
    Internal(String),

    /// 仓库错误
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl DomainError {
    /// 机器可读错误码
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::NotFound(kind) => match kind {
                EntityKind::Company => "ERR_NO_COMPANY_FOUND",
                EntityKind::Plan => "ERR_NO_PLAN_FOUND",
                EntityKind::User => "ERR_NO_USER_FOUND",
                EntityKind::Queue => "ERR_NO_QUEUE_FOUND",
                EntityKind::Contact => "ERR_NO_CONTACT_FOUND",
                EntityKind::Connection => "ERR_NO_CONNECTION_FOUND",
                EntityKind::Ticket => "ERR_NO_TICKET_FOUND",
                EntityKind::Message => "ERR_NO_MESSAGE_FOUND",
                EntityKind::Invoice => "ERR_NO_INVOICE_FOUND",
                EntityKind::Schedule => "ERR_NO_SCHEDULE_FOUND",
            },
            DomainError::ForbiddenTenant => "ERR_FORBIDDEN_TENANT",
            DomainError::InsufficientProfile => "ERR_NO_PERMISSION",
            DomainError::InvalidToken => "ERR_INVALID_TOKEN",
            DomainError::StaleSession => "ERR_STALE_TOKEN",
            DomainError::InvalidCredentials => "ERR_INVALID_CREDENTIALS",
            DomainError::CompanyRequired => "ERR_COMPANY_REQUIRED",
            DomainError::CompanyBlocked => "ERR_COMPANY_BLOCKED",
            DomainError::PlanLimitExceeded(_) => "ERR_PLAN_LIMIT_EXCEEDED",
            DomainError::FeatureDisabled(_) => "ERR_FEATURE_DISABLED",
            DomainError::PlanInUse => "ERR_PLAN_IN_USE",
            DomainError::UserNotInQueue => "ERR_USER_NOT_IN_QUEUE",
            DomainError::TicketConflict => "ERR_TICKET_CONFLICT",
            DomainError::InvalidTransition { .. } => "ERR_INVALID_TRANSITION",
            DomainError::AlreadyExists(code) => code,
            DomainError::InvalidSignature => "ERR_INVALID_SIGNATURE",
            DomainError::Validation(_) => "ERR_VALIDATION",
            DomainError::ExternalDependency(_) => "ERR_EXTERNAL_DEPENDENCY",
            DomainError::Internal(_) => "ERR_INTERNAL",
            DomainError::Repository(RepositoryError::NotFound) => "ERR_NOT_FOUND",
            DomainError::Repository(RepositoryError::Conflict) => "ERR_CONFLICT",
            DomainError::Repository(RepositoryError::Database(_)) => "ERR_INTERNAL",
        }
    }
}
