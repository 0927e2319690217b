// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::describe_counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 安装 Prometheus 导出器并登记计数器说明
///
/// 地址无效或端口占用时只记录警告，服务继续运行
pub fn init_metrics(listen_addr: &str) {
    let addr: SocketAddr = match listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}: {}", listen_addr, e);
            return;
        }
    };

    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counters();
    info!("Metrics exporter listening on {}", addr);
}

fn describe_counters() {
    describe_counter!("ispdesk_tickets_created_total", "Tickets created");
    describe_counter!(
        "ispdesk_ticket_transitions_total",
        "Committed ticket transitions by kind"
    );
    describe_counter!(
        "ispdesk_messages_appended_total",
        "Messages appended by direction and visibility"
    );
    describe_counter!("ispdesk_auto_replies_total", "Automatic replies sent by kind");
    describe_counter!(
        "ispdesk_external_failures_total",
        "Failed calls to external collaborators"
    );
    describe_counter!("ispdesk_auth_failures_total", "Rejected authentications by reason");
    describe_counter!(
        "ispdesk_signature_failures_total",
        "Rejected signed callbacks by reason"
    );
}
