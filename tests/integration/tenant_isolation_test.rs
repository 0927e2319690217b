// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{bearer, TestApp};
use axum::http::StatusCode;
use ispdesk::domain::models::plan::PlanDraft;
use ispdesk::domain::models::ticket::NewTicket;
use serde_json::{json, Value};

#[tokio::test]
async fn test_cross_tenant_ticket_access_is_forbidden() {
    let app = TestApp::spawn().await;
    let a = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let b = app.seed_tenant("Beta Net", PlanDraft::default()).await;

    let contact_b = app.seed_contact(b.company.id, "5511900000002").await;
    let ticket_b = app
        .seed_ticket(NewTicket {
            company_id: b.company.id,
            contact_id: contact_b.id,
            ..Default::default()
        })
        .await;

    let response = app
        .server
        .get(&format!("/tickets/{}", ticket_b.id))
        .add_header("Authorization", bearer(&a.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_FORBIDDEN_TENANT");

    let response = app
        .server
        .get(&format!("/tickets/{}/messages", ticket_b.id))
        .add_header("Authorization", bearer(&a.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    // 不存在的工单仍然是 404
    let response = app
        .server
        .get(&format!("/tickets/{}", uuid::Uuid::new_v4()))
        .add_header("Authorization", bearer(&a.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_NO_TICKET_FOUND");
}

#[tokio::test]
async fn test_cross_tenant_transfer_leaves_ticket_untouched() {
    let app = TestApp::spawn().await;
    let a = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let b = app.seed_tenant("Beta Net", PlanDraft::default()).await;

    let queue_a = app.seed_queue(a.company.id, "Suporte").await;
    let contact_b = app.seed_contact(b.company.id, "5511900000002").await;
    let ticket_b = app
        .seed_ticket(NewTicket {
            company_id: b.company.id,
            contact_id: contact_b.id,
            ..Default::default()
        })
        .await;

    let response = app
        .server
        .put(&format!("/tickets/{}/transfer", ticket_b.id))
        .add_header("Authorization", bearer(&a.token))
        .json(&json!({ "queueId": queue_a.id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_FORBIDDEN_TENANT");

    let reloaded = app.load_ticket(b.company.id, ticket_b.id).await;
    assert_eq!(reloaded.queue_id, None);
    assert_eq!(reloaded.status, ticket_b.status);
}

#[tokio::test]
async fn test_queue_from_other_tenant_is_not_found() {
    let app = TestApp::spawn().await;
    let a = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let b = app.seed_tenant("Beta Net", PlanDraft::default()).await;

    let queue_b = app.seed_queue(b.company.id, "Financeiro").await;
    let contact_a = app.seed_contact(a.company.id, "5511900000001").await;
    let ticket_a = app
        .seed_ticket(NewTicket {
            company_id: a.company.id,
            contact_id: contact_a.id,
            ..Default::default()
        })
        .await;

    let response = app
        .server
        .put(&format!("/tickets/{}/transfer", ticket_a.id))
        .add_header("Authorization", bearer(&a.token))
        .json(&json!({ "queueId": queue_b.id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_NO_QUEUE_FOUND");
}

#[tokio::test]
async fn test_listings_are_scoped_to_the_caller_company() {
    let app = TestApp::spawn().await;
    let a = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let b = app.seed_tenant("Beta Net", PlanDraft::default()).await;

    app.seed_queue(a.company.id, "Suporte").await;
    app.seed_queue(b.company.id, "Vendas").await;
    let contact_b = app.seed_contact(b.company.id, "5511900000002").await;
    app.seed_ticket(NewTicket {
        company_id: b.company.id,
        contact_id: contact_b.id,
        ..Default::default()
    })
    .await;

    let response = app
        .server
        .get("/queues")
        .add_header("Authorization", bearer(&a.token))
        .await;
    let body: Value = response.json();
    let queues = body["data"].as_array().unwrap();
    assert_eq!(queues.len(), 1);
    assert_eq!(queues[0]["name"], "Suporte");

    let response = app
        .server
        .get("/tickets")
        .add_header("Authorization", bearer(&a.token))
        .await;
    let body: Value = response.json();
    assert!(body["data"].as_array().unwrap().is_empty());

    let response = app
        .server
        .get("/contacts")
        .add_header("Authorization", bearer(&a.token))
        .await;
    let body: Value = response.json();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_user_cap_counts_existing_users() {
    let app = TestApp::spawn().await;
    let tenant = app
        .seed_tenant(
            "Acme Fibra",
            PlanDraft {
                users: 2,
                ..Default::default()
            },
        )
        .await;

    let response = app
        .server
        .post("/users")
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({
            "name": "Bruno",
            "email": "bruno@acme.test",
            "password": "secret123",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = app
        .server
        .post("/users")
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({
            "name": "Carla",
            "email": "carla@acme.test",
            "password": "secret123",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_PLAN_LIMIT_EXCEEDED");
}

#[tokio::test]
async fn test_duplicate_email_within_company_is_rejected() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;

    let response = app
        .server
        .post("/users")
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({
            "name": "Outro Admin",
            "email": "Admin@Acme-Fibra.test",
            "password": "secret123",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_company_details_are_private() {
    let app = TestApp::spawn().await;
    let a = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let b = app.seed_tenant("Beta Net", PlanDraft::default()).await;

    let response = app
        .server
        .get(&format!("/companies/{}", b.company.id))
        .add_header("Authorization", bearer(&a.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app
        .server
        .get(&format!("/companies/{}", a.company.id))
        .add_header("Authorization", bearer(&a.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .server
        .get("/companies")
        .add_header("Authorization", bearer(&a.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}
