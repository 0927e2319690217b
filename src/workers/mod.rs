// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 周期性后台任务：账单催缴和定时消息发送
pub mod dunning_worker;
pub mod manager;
pub mod schedule_worker;
pub mod worker;

pub use worker::Worker;
