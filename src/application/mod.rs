// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 组装领域服务并定义 HTTP 请求的数据传输对象
pub mod context;
pub mod dto;
