// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 认证、租户检查、队列路由、工单状态机、消息可见性、套餐功能控制、
/// 设置、账单和定时发送等业务规则，以及外部协作方（通道、AI、支付）的接口。
pub mod ai_service;
pub mod auth_service;
pub mod auto_reply;
pub mod billing_service;
pub mod channel_service;
pub mod company_service;
pub mod connection_service;
pub mod contact_service;
pub mod message_service;
pub mod password_service;
pub mod payment_gateway;
pub mod plan_service;
pub mod queue_service;
pub mod schedule_service;
pub mod settings_store;
pub mod tenant_guard;
pub mod ticket_service;
pub mod user_service;
