// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::WorkerError;
use async_trait::async_trait;
use std::time::Duration;

/// Worker trait定义
///
/// 所有周期性后台工作器都必须实现此trait，`run` 执行一轮处理，
/// 由 `WorkerManager` 按 `interval` 反复调用
#[async_trait]
pub trait Worker: Send + Sync {
    /// 执行一轮处理
    async fn run(&self) -> Result<(), WorkerError>;

    /// 获取工作器名称
    fn name(&self) -> &str;

    /// 两轮之间的间隔
    fn interval(&self) -> Duration;
}
