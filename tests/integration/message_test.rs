// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{bearer, TestApp, CHANNEL_SECRET};
use axum::http::StatusCode;
use ispdesk::domain::models::plan::PlanDraft;
use ispdesk::domain::models::ticket::{NewTicket, Ticket};
use serde_json::{json, Value};

async fn open_ticket(app: &TestApp, company_id: uuid::Uuid) -> Ticket {
    let connection = app.seed_connection(company_id, None).await;
    let contact = app.seed_contact(company_id, "5511900000001").await;
    app.seed_ticket(NewTicket {
        company_id,
        contact_id: contact.id,
        whatsapp_id: Some(connection.id),
        ..Default::default()
    })
    .await
}

#[tokio::test]
async fn test_private_notes_stay_internal() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let ticket = open_ticket(&app, tenant.company.id).await;

    let response = app
        .server
        .post(&format!("/tickets/{}/messages", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "body": "Cliente já ligou 3 vezes" , "isPrivate": true }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["isPrivate"], true);
    assert_eq!(body["data"]["ack"], 0);
    assert!(app.channel.bodies().is_empty());

    let response = app
        .server
        .post(&format!("/tickets/{}/messages", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "body": "Vamos verificar sua conexão" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(app.channel.bodies(), vec!["Vamos verificar sua conexão".to_string()]);

    let stored = app.load_ticket(tenant.company.id, ticket.id).await;
    assert_eq!(stored.last_message, "Vamos verificar sua conexão");

    let response = app
        .server
        .get(&format!("/tickets/{}/messages", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let response = app
        .server
        .get(&format!("/tickets/{}/transcript", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let transcript = body["data"].as_array().unwrap();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0]["body"], "Vamos verificar sua conexão");
}

#[tokio::test]
async fn test_ack_levels_only_move_forward() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let ticket = open_ticket(&app, tenant.company.id).await;

    let response = app
        .server
        .post(&format!("/tickets/{}/messages", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "body": "Boleto enviado" }))
        .await;
    let body: Value = response.json();
    let message_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(message_id, "wamid.0");
    assert_eq!(body["data"]["ack"], 1);

    let response = app
        .post_signed("/channel/acks", CHANNEL_SECRET, &json!({ "id": message_id, "ack": 3 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["ack"], 3);

    let response = app
        .post_signed("/channel/acks", CHANNEL_SECRET, &json!({ "id": message_id, "ack": 2 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["ack"], 3);

    let response = app
        .post_signed("/channel/acks", CHANNEL_SECRET, &json!({ "id": message_id, "ack": 9 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .post_signed("/channel/acks", CHANNEL_SECRET, &json!({ "id": "unknown", "ack": 2 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_channel_failure_keeps_message_pending() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let ticket = open_ticket(&app, tenant.company.id).await;
    app.channel.set_failing(true);

    let response = app
        .server
        .post(&format!("/tickets/{}/messages", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "body": "Tentando de novo" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["ack"], 0);
    assert_ne!(body["data"]["id"], "wamid.0");

    let response = app
        .server
        .get(&format!("/tickets/{}/messages", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_message_body_is_rejected() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let ticket = open_ticket(&app, tenant.company.id).await;

    let response = app
        .server
        .post(&format!("/tickets/{}/messages", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "body": "" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_VALIDATION");
}
