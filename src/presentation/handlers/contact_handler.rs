// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

use super::success;
use crate::application::dto::contact_request::ContactRequestDto;
use crate::domain::services::contact_service::ContactService;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::current_user::CurrentUser;

pub async fn list_contacts(
    Extension(contacts): Extension<Arc<ContactService>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    Ok(success(contacts.list_contacts(&user).await?))
}

pub async fn create_contact(
    Extension(contacts): Extension<Arc<ContactService>>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<ContactRequestDto>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload.validate()?;
    let contact = contacts.create_contact(&user, payload.into()).await?;
    Ok((StatusCode::CREATED, success(contact)))
}
