// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::DomainError;
use crate::presentation::errors::AppError;
use crate::utils::signature::{self, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use metrics::counter;
use std::sync::Arc;
use tracing::warn;

/// 回调请求体上限
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// 时间戳允许的最大偏差（秒）
pub const MAX_CLOCK_SKEW_SECS: u64 = 300;

/// 签名校验状态
///
/// 通道回调和支付回调各自持有一份共享密钥
#[derive(Clone)]
pub struct SignatureState {
    pub secret: Arc<str>,
}

impl SignatureState {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Arc::from(secret),
        }
    }
}

/// 签名校验中间件
///
/// 读取完整请求体，按 `"{timestamp}.{body}"` 校验 HMAC-SHA256 签名，
/// 通过后把请求体原样交给处理器
pub async fn signature_middleware(
    State(state): State<SignatureState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (parts, body) = req.into_parts();

    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let timestamp = header(TIMESTAMP_HEADER)
        .and_then(|value| value.parse::<i64>().ok())
        .ok_or_else(|| rejected("missing_timestamp"))?;
    let provided = header(SIGNATURE_HEADER).ok_or_else(|| rejected("missing_signature"))?;

    if !signature::within_skew(Utc::now().timestamp(), timestamp, MAX_CLOCK_SKEW_SECS) {
        return Err(rejected("expired").into());
    }

    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| DomainError::Validation(e.to_string()))?;

    if !signature::verify(&state.secret, timestamp, &bytes, &provided) {
        warn!(path = %parts.uri.path(), "Rejected callback with bad signature");
        return Err(rejected("mismatch").into());
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

fn rejected(reason: &'static str) -> DomainError {
    counter!("ispdesk_signature_failures_total", "reason" => reason).increment(1);
    DomainError::InvalidSignature
}
