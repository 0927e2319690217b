// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 租户（公司）、套餐、坐席、队列、联系人、通道连接、工单、
/// 消息、设置、账单和定时发送等核心实体
pub mod company;
pub mod connection;
pub mod contact;
pub mod invoice;
pub mod message;
pub mod plan;
pub mod queue;
pub mod schedule;
pub mod setting;
pub mod ticket;
pub mod user;
