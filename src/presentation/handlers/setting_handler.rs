// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

use super::success;
use crate::application::dto::setting_request::UpsertSettingRequestDto;
use crate::domain::services::settings_store::SettingsStore;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::CurrentUser;

pub async fn list_settings(
    Extension(store): Extension<Arc<SettingsStore>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    Ok(success(store.list(&user).await?))
}

pub async fn upsert_setting(
    Extension(store): Extension<Arc<SettingsStore>>,
    CurrentUser(user): CurrentUser,
    Path(key): Path<String>,
    Json(payload): Json<UpsertSettingRequestDto>,
) -> Result<Json<Value>, AppError> {
    payload.validate()?;
    Ok(success(store.upsert(&user, &key, &payload.value).await?))
}
