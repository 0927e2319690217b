// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::schedule_service::ScheduleService;
use crate::utils::errors::WorkerError;
use crate::workers::worker::Worker;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// 每轮最多处理的定时消息数
const BATCH_SIZE: u64 = 50;

/// 定时消息工作器
pub struct ScheduleWorker {
    schedules: Arc<ScheduleService>,
    interval: Duration,
}

impl ScheduleWorker {
    pub fn new(schedules: Arc<ScheduleService>, interval: Duration) -> Self {
        Self {
            schedules,
            interval,
        }
    }
}

#[async_trait]
impl Worker for ScheduleWorker {
    async fn run(&self) -> Result<(), WorkerError> {
        let stats = self.schedules.dispatch_due(Utc::now(), BATCH_SIZE).await?;
        if stats.sent + stats.failed > 0 {
            info!(sent = stats.sent, failed = stats.failed, "Scheduled messages dispatched");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "schedules"
    }

    fn interval(&self) -> Duration {
        self.interval
    }
}
