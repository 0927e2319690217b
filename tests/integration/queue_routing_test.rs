// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{bearer, TestApp};
use axum::http::StatusCode;
use ispdesk::domain::models::plan::PlanDraft;
use ispdesk::domain::models::ticket::{NewTicket, TicketStatus};
use ispdesk::domain::models::user::Profile;
use serde_json::{json, Value};

#[tokio::test]
async fn test_transfer_to_queue_returns_ticket_to_pool() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let agent = app
        .seed_user(tenant.company.id, "agent@acme.test", Profile::User)
        .await;
    let queue = app.seed_queue(tenant.company.id, "Suporte").await;
    let contact = app.seed_contact(tenant.company.id, "5511900000001").await;
    let ticket = app
        .seed_ticket(NewTicket {
            company_id: tenant.company.id,
            contact_id: contact.id,
            user_id: Some(agent.id),
            ..Default::default()
        })
        .await;
    assert_eq!(ticket.status, TicketStatus::Open);

    let response = app
        .server
        .put(&format!("/tickets/{}/transfer", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "queueId": queue.id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["queueId"], queue.id.to_string());
    assert!(body["data"]["userId"].is_null());

    let stored = app.load_ticket(tenant.company.id, ticket.id).await;
    assert_eq!(stored.status, TicketStatus::Pending);
    assert_eq!(stored.queue_id, Some(queue.id));
    assert_eq!(stored.user_id, None);
}

#[tokio::test]
async fn test_assignment_requires_queue_membership() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let agent = app
        .seed_user(tenant.company.id, "agent@acme.test", Profile::User)
        .await;
    let queue = app.seed_queue(tenant.company.id, "Suporte").await;
    let contact = app.seed_contact(tenant.company.id, "5511900000001").await;
    let ticket = app
        .seed_ticket(NewTicket {
            company_id: tenant.company.id,
            contact_id: contact.id,
            queue_id: Some(queue.id),
            ..Default::default()
        })
        .await;

    let response = app
        .server
        .put(&format!("/tickets/{}/transfer", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "userId": agent.id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_USER_NOT_IN_QUEUE");

    app.add_to_queues(&agent, &[queue.id]).await;

    let response = app
        .server
        .put(&format!("/tickets/{}/transfer", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "userId": agent.id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "open");
    assert_eq!(body["data"]["userId"], agent.id.to_string());
    assert_eq!(body["data"]["queueId"], queue.id.to_string());
}

#[tokio::test]
async fn test_transfer_needs_exactly_one_target() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let queue = app.seed_queue(tenant.company.id, "Suporte").await;
    let contact = app.seed_contact(tenant.company.id, "5511900000001").await;
    let ticket = app
        .seed_ticket(NewTicket {
            company_id: tenant.company.id,
            contact_id: contact.id,
            ..Default::default()
        })
        .await;

    let response = app
        .server
        .put(&format!("/tickets/{}/transfer", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "queueId": queue.id, "userId": tenant.admin.id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_VALIDATION");
}

#[tokio::test]
async fn test_deleting_queue_detaches_tickets_and_members() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let agent = app
        .seed_user(tenant.company.id, "agent@acme.test", Profile::User)
        .await;
    let queue = app.seed_queue(tenant.company.id, "Suporte").await;
    app.add_to_queues(&agent, &[queue.id]).await;

    let contact = app.seed_contact(tenant.company.id, "5511900000001").await;
    let waiting = app
        .seed_ticket(NewTicket {
            company_id: tenant.company.id,
            contact_id: contact.id,
            queue_id: Some(queue.id),
            ..Default::default()
        })
        .await;
    let other = app.seed_contact(tenant.company.id, "5511900000003").await;
    let assigned = app
        .seed_ticket(NewTicket {
            company_id: tenant.company.id,
            contact_id: other.id,
            queue_id: Some(queue.id),
            user_id: Some(agent.id),
            ..Default::default()
        })
        .await;

    let response = app
        .server
        .delete(&format!("/queues/{}", queue.id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let waiting = app.load_ticket(tenant.company.id, waiting.id).await;
    assert_eq!(waiting.queue_id, None);
    assert_eq!(waiting.status, TicketStatus::Pending);

    let assigned = app.load_ticket(tenant.company.id, assigned.id).await;
    assert_eq!(assigned.queue_id, None);
    assert_eq!(assigned.user_id, Some(agent.id));
    assert_eq!(assigned.status, TicketStatus::Open);

    let response = app
        .server
        .get("/users")
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    let body: Value = response.json();
    let agent_row = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["id"] == agent.id.to_string())
        .cloned()
        .unwrap();
    assert!(agent_row["queueIds"].as_array().unwrap().is_empty());

    let response = app
        .server
        .delete(&format!("/queues/{}", queue.id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_queue_management_is_admin_only() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let agent = app
        .seed_user(tenant.company.id, "agent@acme.test", Profile::User)
        .await;

    let response = app
        .server
        .post("/queues")
        .add_header("Authorization", bearer(&app.token_for(&agent)))
        .json(&json!({ "name": "Vendas", "color": "#00ff00" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app
        .server
        .post("/queues")
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "name": "Vendas", "color": "#00ff00" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    let queue_id = body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .server
        .put(&format!("/queues/{}", queue_id))
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "name": "Comercial", "color": "#00ff00" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["name"], "Comercial");
}
