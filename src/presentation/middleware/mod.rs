// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 中间件模块
///
/// 提供 HTTP 请求处理的中间件：令牌认证和通道回调签名校验
pub mod auth_middleware;
pub mod signature_middleware;
