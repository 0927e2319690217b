// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::company::Company;
use crate::domain::repositories::company_repository::CompanyRepository;
use crate::infrastructure::database::entities::company;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{sea_query::Expr, *};
use std::sync::Arc;
use uuid::Uuid;

/// 在事务内锁定公司行
///
/// 同一公司的容量计数和插入在锁释放前串行执行。
pub(crate) async fn lock_company<C: ConnectionTrait>(conn: &C, company_id: Uuid) -> Result<(), DbErr> {
    company::Entity::update_many()
        .col_expr(
            company::Column::UpdatedAt,
            Expr::col(company::Column::UpdatedAt).into(),
        )
        .filter(company::Column::Id.eq(company_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// 公司仓库实现
#[derive(Clone)]
pub struct CompanyRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CompanyRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<company::Model> for Company {
    fn from(model: company::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            status: model.status,
            due_date: model.due_date,
            plan_id: model.plan_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl CompanyRepository for CompanyRepositoryImpl {
    async fn create(&self, company: &Company) -> Result<Company, RepositoryError> {
        let model = company::ActiveModel {
            id: Set(company.id),
            name: Set(company.name.clone()),
            email: Set(company.email.clone()),
            phone: Set(company.phone.clone()),
            status: Set(company.status),
            due_date: Set(company.due_date),
            plan_id: Set(company.plan_id),
            created_at: Set(company.created_at),
            updated_at: Set(company.updated_at),
        };
        let inserted = model
            .insert(self.db.as_ref())
            .await
            .map_err(RepositoryError::from_write)?;
        Ok(inserted.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, RepositoryError> {
        let model = company::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Company>, RepositoryError> {
        let models = company::Entity::find()
            .order_by_asc(company::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update_billing(
        &self,
        id: Uuid,
        status: bool,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<(), RepositoryError> {
        let result = company::Entity::update_many()
            .col_expr(company::Column::Status, Expr::value(status))
            .col_expr(company::Column::DueDate, Expr::value(due_date))
            .col_expr(company::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(company::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn block_overdue(&self, cutoff: DateTime<Utc>) -> Result<Vec<Uuid>, RepositoryError> {
        let txn = self.db.begin().await?;

        let ids: Vec<Uuid> = company::Entity::find()
            .select_only()
            .column(company::Column::Id)
            .filter(company::Column::Status.eq(true))
            .filter(company::Column::DueDate.lt(cutoff))
            .into_tuple()
            .all(&txn)
            .await?;

        if !ids.is_empty() {
            company::Entity::update_many()
                .col_expr(company::Column::Status, Expr::value(false))
                .col_expr(company::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(company::Column::Id.is_in(ids.clone()))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(ids)
    }
}
