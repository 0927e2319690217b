// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::context::AppContext;
use crate::workers::dunning_worker::DunningWorker;
use crate::workers::schedule_worker::ScheduleWorker;
use crate::workers::worker::Worker;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// 工作管理器
///
/// 为每个工作器启动一个按固定间隔运行的任务，单轮失败只记录日志
#[derive(Default)]
pub struct WorkerManager {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按配置启动催缴和定时消息工作器
    pub fn start_workers(&mut self, ctx: &AppContext) {
        let settings = &ctx.settings.workers;
        self.spawn(Arc::new(DunningWorker::new(
            ctx.billing.clone(),
            Duration::from_secs(settings.dunning_interval_secs),
        )));
        self.spawn(Arc::new(ScheduleWorker::new(
            ctx.schedules.clone(),
            Duration::from_secs(settings.schedule_interval_secs),
        )));
    }

    /// 启动单个工作器
    pub fn spawn(&mut self, worker: Arc<dyn Worker>) {
        let handle = tokio::spawn(async move {
            info!("{} worker started", worker.name());
            let mut interval = tokio::time::interval(worker.interval());

            loop {
                interval.tick().await;
                if let Err(e) = worker.run().await {
                    error!("{} worker pass failed: {}", worker.name(), e);
                }
            }
        });
        self.handles.push(handle);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// 关闭所有工作器
    pub fn shutdown(&mut self) {
        info!("Shutting down workers...");
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        info!("Workers shut down successfully");
    }
}
