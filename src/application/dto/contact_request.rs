// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::contact_service::ContactInput;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequestDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub number: String,
    #[validate(email)]
    pub email: Option<String>,
    pub ixc_id: Option<String>,
    pub cpf: Option<String>,
}

impl From<ContactRequestDto> for ContactInput {
    fn from(dto: ContactRequestDto) -> Self {
        Self {
            name: dto.name,
            number: dto.number,
            email: dto.email,
            ixc_id: dto.ixc_id,
            cpf: dto.cpf,
        }
    }
}
