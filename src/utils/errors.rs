// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// 仓库层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// 记录未找到
    #[error("Record not found")]
    NotFound,

    /// 条件更新未命中（并发修改）
    #[error("Concurrent modification detected")]
    Conflict,
}

impl RepositoryError {
    /// 写入错误转换，唯一约束冲突映射为 `Conflict`
    pub fn from_write(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => RepositoryError::Conflict,
            _ => RepositoryError::Database(err),
        }
    }
}

/// Worker错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Domain error: {0}")]
    DomainError(String),
}

impl From<RepositoryError> for WorkerError {
    fn from(err: RepositoryError) -> Self {
        WorkerError::RepositoryError(err.to_string())
    }
}

impl From<crate::domain::errors::DomainError> for WorkerError {
    fn from(err: crate::domain::errors::DomainError) -> Self {
        WorkerError::DomainError(err.to_string())
    }
}
