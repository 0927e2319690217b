// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::errors::{DomainError, EntityKind};
use crate::domain::models::ticket::Ticket;
use crate::domain::repositories::ticket_repository::TicketRepository;
use metrics::counter;
use tracing::warn;
use uuid::Uuid;

/// 按租户加载工单
///
/// 工单属于其他公司时返回 `DomainError::ForbiddenTenant`，且在任何状态变更之前返回；
/// 完全不存在时返回 `ERR_NO_TICKET_FOUND`。
pub async fn load_ticket(
    repo: &dyn TicketRepository,
    company_id: Uuid,
    ticket_id: Uuid,
) -> Result<Ticket, DomainError> {
    if let Some(ticket) = repo.find_by_id(company_id, ticket_id).await? {
        return Ok(ticket);
    }

    match repo.owner_of(ticket_id).await? {
        Some(owner) => {
            warn!(
                ticket_id = %ticket_id,
                company_id = %company_id,
                owner = %owner,
                "Cross-tenant ticket access rejected"
            );
            counter!("ispdesk_auth_failures_total", "reason" => "forbidden_tenant").increment(1);
            Err(DomainError::ForbiddenTenant)
        }
        None => Err(DomainError::NotFound(EntityKind::Ticket)),
    }
}
