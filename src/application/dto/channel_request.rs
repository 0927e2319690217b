// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::connection::ConnectionStatus;
use serde::Deserialize;
use uuid::Uuid;

/// 通道上报的送达确认
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AckUpdateDto {
    /// 通道消息ID
    pub id: String,
    pub ack: i32,
    /// 发出该消息的连接，提供时确认只作用于该连接所属公司
    pub connection_id: Option<Uuid>,
}

/// 通道上报的连接状态
#[derive(Debug, Deserialize)]
pub struct ConnectionStatusDto {
    pub status: ConnectionStatus,
}
