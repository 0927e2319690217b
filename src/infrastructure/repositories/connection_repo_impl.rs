// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::connection::{Connection, ConnectionStatus};
use crate::domain::repositories::connection_repository::ConnectionRepository;
use crate::infrastructure::database::entities::connection;
use crate::infrastructure::repositories::company_repo_impl::lock_company;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{sea_query::Expr, *};
use std::sync::Arc;
use uuid::Uuid;

/// 通道连接仓库实现
#[derive(Clone)]
pub struct ConnectionRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ConnectionRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<connection::Model> for Connection {
    fn from(model: connection::Model) -> Self {
        Self {
            id: model.id,
            company_id: model.company_id,
            name: model.name,
            status: model.status.parse().unwrap_or_default(),
            greeting_message: model.greeting_message,
            farewell_message: model.farewell_message,
            is_default: model.is_default,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

async fn insert_connection(
    txn: &DatabaseTransaction,
    conn: &Connection,
) -> Result<Connection, RepositoryError> {
    // 每个公司只有一个默认连接
    if conn.is_default {
        connection::Entity::update_many()
            .col_expr(connection::Column::IsDefault, Expr::value(false))
            .filter(connection::Column::CompanyId.eq(conn.company_id))
            .exec(txn)
            .await?;
    }

    let model = connection::ActiveModel {
        id: Set(conn.id),
        company_id: Set(conn.company_id),
        name: Set(conn.name.clone()),
        status: Set(conn.status.to_string()),
        greeting_message: Set(conn.greeting_message.clone()),
        farewell_message: Set(conn.farewell_message.clone()),
        is_default: Set(conn.is_default),
        created_at: Set(conn.created_at),
        updated_at: Set(conn.updated_at),
    };
    let inserted = model.insert(txn).await.map_err(RepositoryError::from_write)?;
    Ok(inserted.into())
}

#[async_trait]
impl ConnectionRepository for ConnectionRepositoryImpl {
    async fn create(&self, conn: &Connection) -> Result<Connection, RepositoryError> {
        let txn = self.db.begin().await?;
        let inserted = insert_connection(&txn, conn).await?;
        txn.commit().await?;
        Ok(inserted)
    }

    async fn create_capped(
        &self,
        conn: &Connection,
        cap: u64,
    ) -> Result<Option<Connection>, RepositoryError> {
        let txn = self.db.begin().await?;
        lock_company(&txn, conn.company_id).await?;

        let current = connection::Entity::find()
            .filter(connection::Column::CompanyId.eq(conn.company_id))
            .count(&txn)
            .await?;
        if current >= cap {
            txn.rollback().await?;
            return Ok(None);
        }

        let inserted = insert_connection(&txn, conn).await?;
        txn.commit().await?;
        Ok(Some(inserted))
    }

    async fn find_by_id(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Connection>, RepositoryError> {
        let model = connection::Entity::find_by_id(id)
            .filter(connection::Column::CompanyId.eq(company_id))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_for_channel(&self, id: Uuid) -> Result<Option<Connection>, RepositoryError> {
        let model = connection::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_default(&self, company_id: Uuid) -> Result<Option<Connection>, RepositoryError> {
        let model = connection::Entity::find()
            .filter(connection::Column::CompanyId.eq(company_id))
            .order_by_desc(connection::Column::IsDefault)
            .order_by_asc(connection::Column::CreatedAt)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, company_id: Uuid) -> Result<Vec<Connection>, RepositoryError> {
        let models = connection::Entity::find()
            .filter(connection::Column::CompanyId.eq(company_id))
            .order_by_asc(connection::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count(&self, company_id: Uuid) -> Result<u64, RepositoryError> {
        let count = connection::Entity::find()
            .filter(connection::Column::CompanyId.eq(company_id))
            .count(self.db.as_ref())
            .await?;
        Ok(count)
    }

    async fn update_status(
        &self,
        company_id: Uuid,
        id: Uuid,
        status: ConnectionStatus,
    ) -> Result<(), RepositoryError> {
        let result = connection::Entity::update_many()
            .col_expr(connection::Column::Status, Expr::value(status.to_string()))
            .col_expr(connection::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(connection::Column::Id.eq(id))
            .filter(connection::Column::CompanyId.eq(company_id))
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
