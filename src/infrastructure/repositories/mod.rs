// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供领域仓库接口基于 SeaORM 的具体实现
pub mod company_repo_impl;
pub mod connection_repo_impl;
pub mod contact_repo_impl;
pub mod invoice_repo_impl;
pub mod message_repo_impl;
pub mod plan_repo_impl;
pub mod queue_repo_impl;
pub mod schedule_repo_impl;
pub mod setting_repo_impl;
pub mod ticket_repo_impl;
pub mod user_repo_impl;
