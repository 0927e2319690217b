// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 请求提取器模块
///
/// 从请求扩展中取出认证中间件解析的会话身份
pub mod current_user;
