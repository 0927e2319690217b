// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::TestApp;
use chrono::Utc;
use ispdesk::domain::errors::DomainError;
use ispdesk::domain::models::plan::PlanDraft;
use ispdesk::domain::models::ticket::{NewTicket, TicketStatus};
use ispdesk::domain::models::user::Profile;
use ispdesk::domain::repositories::ticket_repository::TicketRepository;
use ispdesk::domain::services::ticket_service::commit_transition;
use ispdesk::infrastructure::repositories::ticket_repo_impl::TicketRepositoryImpl;

#[tokio::test]
async fn test_transition_from_stale_snapshot_is_rejected() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let contact = app.seed_contact(tenant.company.id, "5511900000001").await;
    let first = app
        .seed_user(tenant.company.id, "ana@acme.test", Profile::User)
        .await;
    let second = app
        .seed_user(tenant.company.id, "bruno@acme.test", Profile::User)
        .await;
    let snapshot = app
        .seed_ticket(NewTicket {
            company_id: tenant.company.id,
            contact_id: contact.id,
            ..Default::default()
        })
        .await;
    let repo = TicketRepositoryImpl::new(app.db.clone());

    let transition = snapshot.assign_to(first.id).unwrap();
    assert!(repo.apply_transition(&transition, Utc::now()).await.unwrap());
    // 同一快照第二次提交时前置路由已经不匹配
    assert!(!repo.apply_transition(&transition, Utc::now()).await.unwrap());

    let stale = snapshot.assign_to(second.id).unwrap();
    let result = commit_transition(&repo, snapshot.clone(), stale).await;
    assert!(matches!(result, Err(DomainError::TicketConflict)));

    let stored = app.load_ticket(tenant.company.id, snapshot.id).await;
    assert_eq!(stored.status, TicketStatus::Open);
    assert_eq!(stored.user_id, Some(first.id));
}

#[tokio::test]
async fn test_transition_is_scoped_to_the_owning_company() {
    let app = TestApp::spawn().await;
    let owner = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let intruder = app.seed_tenant("Outra ISP", PlanDraft::default()).await;
    let contact = app.seed_contact(owner.company.id, "5511900000002").await;
    let ticket = app
        .seed_ticket(NewTicket {
            company_id: owner.company.id,
            contact_id: contact.id,
            ..Default::default()
        })
        .await;
    let repo = TicketRepositoryImpl::new(app.db.clone());

    let mut transition = ticket.resolve(Utc::now()).unwrap();
    transition.company_id = intruder.company.id;
    assert!(!repo.apply_transition(&transition, Utc::now()).await.unwrap());

    let stored = app.load_ticket(owner.company.id, ticket.id).await;
    assert_eq!(stored.status, ticket.status);
    assert!(stored.closed_at.is_none());
}
