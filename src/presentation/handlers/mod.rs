// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

/// HTTP请求处理器模块
///
/// 每个处理器从扩展中取得领域服务，校验请求体后调用服务，
/// 成功时返回 `{"success": true, "data": ...}`
pub mod auth_handler;
pub mod billing_handler;
pub mod channel_handler;
pub mod company_handler;
pub mod connection_handler;
pub mod contact_handler;
pub mod health_handler;
pub mod message_handler;
pub mod plan_handler;
pub mod queue_handler;
pub mod schedule_handler;
pub mod setting_handler;
pub mod ticket_handler;
pub mod user_handler;

/// 统一的成功响应
pub(crate) fn success<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": data
    }))
}
