// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::{DomainError, EntityKind};
use crate::domain::models::company::Company;
use crate::domain::models::plan::{Feature, Plan, PlanDraft, Resource};
use crate::domain::models::user::AuthUser;
use crate::domain::repositories::company_repository::CompanyRepository;
use crate::domain::repositories::connection_repository::ConnectionRepository;
use crate::domain::repositories::plan_repository::PlanRepository;
use crate::domain::repositories::queue_repository::QueueRepository;
use crate::domain::repositories::user_repository::UserRepository;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// 套餐服务
///
/// 负责功能开关判断、容量检查和套餐管理。公司的可用功能
/// 完全由其套餐上的布尔开关决定。
pub struct PlanService {
    plan_repo: Arc<dyn PlanRepository>,
    company_repo: Arc<dyn CompanyRepository>,
    user_repo: Arc<dyn UserRepository>,
    queue_repo: Arc<dyn QueueRepository>,
    connection_repo: Arc<dyn ConnectionRepository>,
}

impl PlanService {
    pub fn new(
        plan_repo: Arc<dyn PlanRepository>,
        company_repo: Arc<dyn CompanyRepository>,
        user_repo: Arc<dyn UserRepository>,
        queue_repo: Arc<dyn QueueRepository>,
        connection_repo: Arc<dyn ConnectionRepository>,
    ) -> Self {
        Self {
            plan_repo,
            company_repo,
            user_repo,
            queue_repo,
            connection_repo,
        }
    }

    /// 解析公司及其套餐
    pub async fn company_plan(&self, company_id: Uuid) -> Result<(Company, Plan), DomainError> {
        let company = self
            .company_repo
            .find_by_id(company_id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::Company))?;
        let plan = self
            .plan_repo
            .find_by_id(company.plan_id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::Plan))?;
        Ok((company, plan))
    }

    pub async fn is_feature_enabled(
        &self,
        company_id: Uuid,
        feature: Feature,
    ) -> Result<bool, DomainError> {
        let (_, plan) = self.company_plan(company_id).await?;
        Ok(plan.has_feature(feature))
    }

    /// 功能未开通时返回 `DomainError::FeatureDisabled`
    pub async fn require_feature(&self, company_id: Uuid, feature: Feature) -> Result<(), DomainError> {
        if self.is_feature_enabled(company_id, feature).await? {
            Ok(())
        } else {
            debug!(company_id = %company_id, feature = %feature, "Feature disabled by plan");
            Err(DomainError::FeatureDisabled(feature))
        }
    }

    pub async fn enabled_features(&self, company_id: Uuid) -> Result<Vec<Feature>, DomainError> {
        let (_, plan) = self.company_plan(company_id).await?;
        Ok(plan.enabled_features())
    }

    /// 当前套餐对该资源的上限，`None` 表示不限
    ///
    /// 创建时把上限交给仓库的 `create_capped`，计数和插入在同一事务内完成。
    pub async fn cap_for(&self, company_id: Uuid, resource: Resource) -> Result<Option<u64>, DomainError> {
        let (_, plan) = self.company_plan(company_id).await?;
        Ok(u64::try_from(plan.cap(resource)).ok().filter(|cap| *cap > 0))
    }

    /// 创建资源前检查套餐容量
    ///
    /// 只做提前拒绝，并发创建仍以 `create_capped` 的结果为准。
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 可以再创建一个
    /// * `Err(DomainError::PlanLimitExceeded)` - 已达到上限
    pub async fn check_capacity(&self, company_id: Uuid, resource: Resource) -> Result<(), DomainError> {
        let (_, plan) = self.company_plan(company_id).await?;
        if plan.cap(resource) == 0 {
            return Ok(());
        }
        let current = match resource {
            Resource::Users => self.user_repo.count(company_id).await?,
            Resource::Connections => self.connection_repo.count(company_id).await?,
            Resource::Queues => self.queue_repo.count(company_id).await?,
        };
        plan.check_capacity(resource, current)
    }

    pub async fn list_plans(&self) -> Result<Vec<Plan>, DomainError> {
        Ok(self.plan_repo.list().await?)
    }

    pub async fn get_plan(&self, id: Uuid) -> Result<Plan, DomainError> {
        self.plan_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound(EntityKind::Plan))
    }

    pub async fn create_plan(&self, acting: &AuthUser, draft: PlanDraft) -> Result<Plan, DomainError> {
        acting.authorize_super_admin()?;
        validate_draft(&draft)?;
        let plan = self.plan_repo.create(&Plan::new(draft)).await?;
        info!(plan_id = %plan.id, name = %plan.name, "Plan created");
        Ok(plan)
    }

    pub async fn update_plan(
        &self,
        acting: &AuthUser,
        id: Uuid,
        draft: PlanDraft,
    ) -> Result<Plan, DomainError> {
        acting.authorize_super_admin()?;
        validate_draft(&draft)?;
        let mut plan = self.get_plan(id).await?;
        plan.apply(draft);
        Ok(self.plan_repo.update(&plan).await?)
    }

    /// 删除套餐，仍被公司引用时返回 `DomainError::PlanInUse`
    pub async fn delete_plan(&self, acting: &AuthUser, id: Uuid) -> Result<(), DomainError> {
        acting.authorize_super_admin()?;
        if self.plan_repo.count_companies(id).await? > 0 {
            return Err(DomainError::PlanInUse);
        }
        if !self.plan_repo.delete(id).await? {
            return Err(DomainError::NotFound(EntityKind::Plan));
        }
        info!(plan_id = %id, "Plan deleted");
        Ok(())
    }
}

fn validate_draft(draft: &PlanDraft) -> Result<(), DomainError> {
    if draft.name.trim().is_empty() {
        return Err(DomainError::Validation("plan name is required".to_string()));
    }
    if draft.users < 0 || draft.connections < 0 || draft.queues < 0 || draft.amount_cents < 0 {
        return Err(DomainError::Validation(
            "plan limits must not be negative".to_string(),
        ));
    }
    Ok(())
}
