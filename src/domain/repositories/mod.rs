// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 所有租户数据的读写方法都显式接收 `company_id`，租户过滤在查询条件中完成，
/// 不依赖调用方自行过滤。少数系统路径（登录、通道回调、后台任务）
/// 没有会话上下文，方法名中会注明。
///
/// 这些接口确保了领域层不依赖于具体的数据存储技术，
/// 提高了系统的可测试性和可维护性。
pub mod company_repository;
pub mod connection_repository;
pub mod contact_repository;
pub mod invoice_repository;
pub mod message_repository;
pub mod plan_repository;
pub mod queue_repository;
pub mod schedule_repository;
pub mod setting_repository;
pub mod ticket_repository;
pub mod user_repository;
