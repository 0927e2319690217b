// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 组装领域服务，定义请求数据传输对象
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含租户、工单、队列、套餐等核心业务实体、服务和仓库接口
pub mod domain;

/// 基础设施模块
///
/// 提供数据库、指标导出以及通道、AI、支付等外部服务集成
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和中间件
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 账单催缴和定时消息等周期性后台任务
pub mod workers;
