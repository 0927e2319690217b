// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::{DomainError, EntityKind};
use crate::domain::models::invoice::Invoice;
use crate::domain::models::user::AuthUser;
use crate::domain::repositories::company_repository::CompanyRepository;
use crate::domain::repositories::invoice_repository::InvoiceRepository;
use crate::domain::repositories::plan_repository::PlanRepository;
use crate::domain::services::payment_gateway::{CheckoutRequest, PaymentGateway};
use chrono::{DateTime, Duration, Utc};
use metrics::counter;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// 支付会话
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub invoice_id: Uuid,
    pub url: String,
}

/// 一次催缴执行的结果
#[derive(Debug, Clone, Default)]
pub struct DunningReport {
    pub overdue_invoices: u64,
    pub blocked_companies: Vec<Uuid>,
}

/// 账单服务
///
/// 负责支付会话、付款确认和催缴。付款确认会解冻公司并顺延到期时间，
/// 重复确认不会重复顺延。
pub struct BillingService {
    invoice_repo: Arc<dyn InvoiceRepository>,
    company_repo: Arc<dyn CompanyRepository>,
    plan_repo: Arc<dyn PlanRepository>,
    gateway: Arc<dyn PaymentGateway>,
    renewal_days: i64,
    grace_days: i64,
}

impl BillingService {
    pub fn new(
        invoice_repo: Arc<dyn InvoiceRepository>,
        company_repo: Arc<dyn CompanyRepository>,
        plan_repo: Arc<dyn PlanRepository>,
        gateway: Arc<dyn PaymentGateway>,
        renewal_days: i64,
        grace_days: i64,
    ) -> Self {
        Self {
            invoice_repo,
            company_repo,
            plan_repo,
            gateway,
            renewal_days,
            grace_days,
        }
    }

    pub async fn list_invoices(&self, acting: &AuthUser) -> Result<Vec<Invoice>, DomainError> {
        Ok(self.invoice_repo.list(acting.company_id).await?)
    }

    /// 为指定公司开具账单（仅超级管理员）
    pub async fn create_invoice(
        &self,
        acting: &AuthUser,
        company_id: Uuid,
        detail: String,
        value_cents: i64,
        due_date: DateTime<Utc>,
    ) -> Result<Invoice, DomainError> {
        acting.authorize_super_admin()?;
        if self.company_repo.find_by_id(company_id).await?.is_none() {
            return Err(DomainError::NotFound(EntityKind::Company));
        }
        if value_cents < 0 {
            return Err(DomainError::Validation("invoice value must not be negative".to_string()));
        }
        let invoice = self
            .invoice_repo
            .create(&Invoice::new(company_id, detail, value_cents, due_date))
            .await?;
        info!(company_id = %company_id, invoice_id = %invoice.id, "Invoice issued");
        Ok(invoice)
    }

    /// 创建支付会话
    ///
    /// 按套餐价格开具一张账单并向支付网关申请会话；网关失败返回
    /// `DomainError::ExternalDependency`。
    pub async fn create_checkout(
        &self,
        acting: &AuthUser,
        plan_id: Option<Uuid>,
        method: String,
    ) -> Result<CheckoutSession, DomainError> {
        let company = self
            .company_repo
            .find_by_id(acting.company_id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::Company))?;
        let plan_id = plan_id.unwrap_or(company.plan_id);
        let plan = self
            .plan_repo
            .find_by_id(plan_id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::Plan))?;

        let now = Utc::now();
        let due_date = company.due_date.filter(|due| *due > now).unwrap_or(now);
        let invoice = self
            .invoice_repo
            .create(&Invoice::new(
                company.id,
                format!("Plano {}", plan.name),
                plan.amount_cents,
                due_date,
            ))
            .await?;

        let request = CheckoutRequest {
            company_id: company.id,
            plan_id: plan.id,
            invoice_id: invoice.id,
            amount_cents: plan.amount_cents,
            method,
            description: invoice.detail.clone(),
        };

        match self.gateway.create_checkout_session(&request).await {
            Ok(url) => {
                info!(company_id = %company.id, invoice_id = %invoice.id, "Checkout session created");
                Ok(CheckoutSession {
                    invoice_id: invoice.id,
                    url,
                })
            }
            Err(e) => {
                error!(company_id = %company.id, "Payment gateway failed: {}", e);
                counter!("ispdesk_external_failures_total", "dependency" => "payment_gateway")
                    .increment(1);
                Err(DomainError::ExternalDependency("payment gateway".to_string()))
            }
        }
    }

    /// 付款确认
    ///
    /// 账单标记为已支付，公司解冻，到期时间从当前到期时间和现在中较晚的一个
    /// 顺延 `renewal_days` 天。已支付的账单再次确认时不做任何变更。
    pub async fn confirm_payment(&self, company_id: Uuid, invoice_id: Uuid) -> Result<Invoice, DomainError> {
        let now = Utc::now();
        let company = self
            .company_repo
            .find_by_id(company_id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::Company))?;
        if self.invoice_repo.find_by_id(company_id, invoice_id).await?.is_none() {
            return Err(DomainError::NotFound(EntityKind::Invoice));
        }

        if self.invoice_repo.mark_paid(company_id, invoice_id, now).await? {
            let due_date = company.renewed_due_date(now, self.renewal_days);
            self.company_repo
                .update_billing(company_id, true, Some(due_date))
                .await?;
            info!(
                company_id = %company_id,
                invoice_id = %invoice_id,
                due_date = %due_date,
                "Payment confirmed"
            );
        } else {
            warn!(invoice_id = %invoice_id, "Duplicate payment confirmation ignored");
        }

        self.invoice_repo
            .find_by_id(company_id, invoice_id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::Invoice))
    }

    /// 催缴：标记逾期账单并冻结超过宽限期的公司
    pub async fn run_dunning(&self, now: DateTime<Utc>) -> Result<DunningReport, DomainError> {
        let overdue_invoices = self.invoice_repo.mark_overdue(now).await?;
        let cutoff = now - Duration::days(self.grace_days);
        let blocked_companies = self.company_repo.block_overdue(cutoff).await?;

        for company_id in &blocked_companies {
            warn!(company_id = %company_id, "Company blocked for non-payment");
        }

        Ok(DunningReport {
            overdue_invoices,
            blocked_companies,
        })
    }
}
