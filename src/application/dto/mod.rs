// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义 HTTP 请求体对应的数据传输对象，
/// 负责输入校验并转换为领域层的参数类型
pub mod auth_request;
pub mod billing_request;
pub mod channel_request;
pub mod company_request;
pub mod connection_request;
pub mod contact_request;
pub mod message_request;
pub mod queue_request;
pub mod schedule_request;
pub mod setting_request;
pub mod ticket_request;
pub mod user_request;
