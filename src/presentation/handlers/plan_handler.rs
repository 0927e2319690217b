// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use super::success;
use crate::domain::models::plan::PlanDraft;
use crate::domain::services::plan_service::PlanService;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::CurrentUser;

pub async fn list_plans(
    Extension(plans): Extension<Arc<PlanService>>,
    CurrentUser(_user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    Ok(success(plans.list_plans().await?))
}

pub async fn get_plan(
    Extension(plans): Extension<Arc<PlanService>>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    Ok(success(plans.get_plan(id).await?))
}

pub async fn create_plan(
    Extension(plans): Extension<Arc<PlanService>>,
    CurrentUser(user): CurrentUser,
    Json(draft): Json<PlanDraft>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let plan = plans.create_plan(&user, draft).await?;
    Ok((StatusCode::CREATED, success(plan)))
}

pub async fn update_plan(
    Extension(plans): Extension<Arc<PlanService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(draft): Json<PlanDraft>,
) -> Result<Json<Value>, AppError> {
    Ok(success(plans.update_plan(&user, id, draft).await?))
}

pub async fn delete_plan(
    Extension(plans): Extension<Arc<PlanService>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    plans.delete_plan(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 当前公司套餐开通的功能，供前端隐藏菜单
pub async fn enabled_features(
    Extension(plans): Extension<Arc<PlanService>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    Ok(success(plans.enabled_features(user.company_id).await?))
}
