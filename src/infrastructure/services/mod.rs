// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 外部服务实现模块
///
/// 通道网关、AI 和支付网关的 HTTP 客户端
pub mod ai_service_impl;
pub mod channel_service_impl;
pub mod payment_gateway_impl;
