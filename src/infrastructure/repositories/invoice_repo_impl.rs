// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::invoice::{Invoice, InvoiceStatus};
use crate::domain::repositories::invoice_repository::InvoiceRepository;
use crate::infrastructure::database::entities::invoice;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{sea_query::Expr, *};
use std::sync::Arc;
use uuid::Uuid;

/// 账单仓库实现
#[derive(Clone)]
pub struct InvoiceRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl InvoiceRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<invoice::Model> for Invoice {
    fn from(model: invoice::Model) -> Self {
        Self {
            id: model.id,
            company_id: model.company_id,
            detail: model.detail,
            value_cents: model.value_cents,
            status: model.status.parse().unwrap_or_default(),
            due_date: model.due_date,
            paid_at: model.paid_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl InvoiceRepository for InvoiceRepositoryImpl {
    async fn create(&self, inv: &Invoice) -> Result<Invoice, RepositoryError> {
        let model = invoice::ActiveModel {
            id: Set(inv.id),
            company_id: Set(inv.company_id),
            detail: Set(inv.detail.clone()),
            value_cents: Set(inv.value_cents),
            status: Set(inv.status.to_string()),
            due_date: Set(inv.due_date),
            paid_at: Set(inv.paid_at),
            created_at: Set(inv.created_at),
            updated_at: Set(inv.updated_at),
        };
        let inserted = model
            .insert(self.db.as_ref())
            .await
            .map_err(RepositoryError::from_write)?;
        Ok(inserted.into())
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Option<Invoice>, RepositoryError> {
        let model = invoice::Entity::find_by_id(id)
            .filter(invoice::Column::CompanyId.eq(company_id))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, company_id: Uuid) -> Result<Vec<Invoice>, RepositoryError> {
        let models = invoice::Entity::find()
            .filter(invoice::Column::CompanyId.eq(company_id))
            .order_by_desc(invoice::Column::DueDate)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn mark_paid(
        &self,
        company_id: Uuid,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let result = invoice::Entity::update_many()
            .col_expr(invoice::Column::Status, Expr::value(InvoiceStatus::Paid.to_string()))
            .col_expr(invoice::Column::PaidAt, Expr::value(Some(at)))
            .col_expr(invoice::Column::UpdatedAt, Expr::value(at))
            .filter(invoice::Column::Id.eq(id))
            .filter(invoice::Column::CompanyId.eq(company_id))
            .filter(invoice::Column::Status.ne(InvoiceStatus::Paid.to_string()))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn mark_overdue(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = invoice::Entity::update_many()
            .col_expr(invoice::Column::Status, Expr::value(InvoiceStatus::Overdue.to_string()))
            .col_expr(invoice::Column::UpdatedAt, Expr::value(now))
            .filter(invoice::Column::Status.eq(InvoiceStatus::Open.to_string()))
            .filter(invoice::Column::DueDate.lt(now))
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }
}
