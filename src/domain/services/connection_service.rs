// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::{DomainError, EntityKind};
use crate::domain::models::connection::{Connection, ConnectionStatus};
use crate::domain::models::plan::Resource;
use crate::domain::models::user::{AuthUser, Profile};
use crate::domain::repositories::connection_repository::ConnectionRepository;
use crate::domain::services::plan_service::PlanService;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct ConnectionInput {
    pub name: String,
    pub greeting_message: Option<String>,
    pub farewell_message: Option<String>,
    pub is_default: bool,
}

/// 通道连接服务
pub struct ConnectionService {
    connection_repo: Arc<dyn ConnectionRepository>,
    plan_service: Arc<PlanService>,
}

impl ConnectionService {
    pub fn new(connection_repo: Arc<dyn ConnectionRepository>, plan_service: Arc<PlanService>) -> Self {
        Self {
            connection_repo,
            plan_service,
        }
    }

    pub async fn list_connections(&self, acting: &AuthUser) -> Result<Vec<Connection>, DomainError> {
        Ok(self.connection_repo.list(acting.company_id).await?)
    }

    pub async fn create_connection(
        &self,
        acting: &AuthUser,
        input: ConnectionInput,
    ) -> Result<Connection, DomainError> {
        acting.authorize(Profile::Admin)?;
        let cap = self
            .plan_service
            .cap_for(acting.company_id, Resource::Connections)
            .await?;

        let mut connection = Connection::new(acting.company_id, input.name, input.is_default);
        connection.greeting_message = input.greeting_message;
        connection.farewell_message = input.farewell_message;
        let connection = match cap {
            Some(cap) => self
                .connection_repo
                .create_capped(&connection, cap)
                .await?
                .ok_or(DomainError::PlanLimitExceeded(Resource::Connections))?,
            None => self.connection_repo.create(&connection).await?,
        };
        info!(company_id = %connection.company_id, connection_id = %connection.id, "Connection created");
        Ok(connection)
    }

    /// 通道回调路径：连接所属公司
    pub async fn company_of(&self, connection_id: Uuid) -> Result<Uuid, DomainError> {
        self.connection_repo
            .find_for_channel(connection_id)
            .await?
            .map(|connection| connection.company_id)
            .ok_or(DomainError::NotFound(EntityKind::Connection))
    }

    /// 通道网关上报连接状态
    pub async fn report_status(
        &self,
        connection_id: Uuid,
        status: ConnectionStatus,
    ) -> Result<Connection, DomainError> {
        let mut connection = self
            .connection_repo
            .find_for_channel(connection_id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::Connection))?;
        if connection.status != status {
            self.connection_repo
                .update_status(connection.company_id, connection.id, status)
                .await?;
            info!(
                connection_id = %connection.id,
                from = %connection.status,
                to = %status,
                "Connection status changed"
            );
            connection.status = status;
        }
        Ok(connection)
    }
}
