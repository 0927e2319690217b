// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// 密码哈希服务
///
/// 使用 Argon2id，成本参数来自配置；哈希计算放到阻塞线程池执行。
#[derive(Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> anyhow::Result<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| anyhow::anyhow!("invalid argon2 parameters: {}", e))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let argon2 = self.argon2.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| DomainError::Internal(format!("password hashing failed: {}", e)))
        })
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))?
    }

    /// 校验密码；存储的哈希格式无法解析时视为不匹配
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let argon2 = self.argon2.clone();
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || match PasswordHash::new(&hash) {
            Ok(parsed) => argon2.verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                false
            }
        })
        .await
        .map_err(|e| DomainError::Internal(e.to_string()))
    }
}
