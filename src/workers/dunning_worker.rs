// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::billing_service::BillingService;
use crate::utils::errors::WorkerError;
use crate::workers::worker::Worker;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// 催缴工作器
///
/// 定期把过期的账单标记为逾期，并冻结超过宽限期仍未付款的公司
pub struct DunningWorker {
    billing: Arc<BillingService>,
    interval: Duration,
}

impl DunningWorker {
    pub fn new(billing: Arc<BillingService>, interval: Duration) -> Self {
        Self { billing, interval }
    }
}

#[async_trait]
impl Worker for DunningWorker {
    async fn run(&self) -> Result<(), WorkerError> {
        let report = self.billing.run_dunning(Utc::now()).await?;
        if report.overdue_invoices > 0 || !report.blocked_companies.is_empty() {
            info!(
                overdue_invoices = report.overdue_invoices,
                blocked_companies = report.blocked_companies.len(),
                "Dunning pass finished"
            );
        } else {
            debug!("Dunning pass found nothing to do");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "dunning"
    }

    fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
#[path = "dunning_worker_test.rs"]
mod tests;
