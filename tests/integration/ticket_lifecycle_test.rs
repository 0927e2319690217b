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
async fn test_agent_started_ticket_sends_first_message() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let connection = app.seed_connection(tenant.company.id, None).await;
    let contact = app.seed_contact(tenant.company.id, "5511900000001").await;

    let response = app
        .server
        .post("/tickets")
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "contactId": contact.id, "body": "Olá, aqui é o suporte" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["whatsappId"], connection.id.to_string());
    assert_eq!(body["data"]["lastMessage"], "Olá, aqui é o suporte");
    let ticket_id = body["data"]["id"].as_str().unwrap().to_string();

    assert_eq!(app.channel.bodies(), vec!["Olá, aqui é o suporte".to_string()]);

    // 已有未结束的工单时复用
    let response = app
        .server
        .post("/tickets")
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "contactId": contact.id, "body": "Segunda mensagem" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["id"], ticket_id.as_str());
}

#[tokio::test]
async fn test_resolve_closes_and_sends_farewell() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let connection = app
        .seed_connection(tenant.company.id, Some("Obrigado pelo contato!"))
        .await;
    let contact = app.seed_contact(tenant.company.id, "5511900000001").await;
    let ticket = app
        .seed_ticket(NewTicket {
            company_id: tenant.company.id,
            contact_id: contact.id,
            user_id: Some(tenant.admin.id),
            whatsapp_id: Some(connection.id),
            ..Default::default()
        })
        .await;

    app.deliver(
        connection.id,
        &json!({ "id": "in-1", "from": "5511900000001@s.whatsapp.net", "body": "oi" }),
    )
    .await;
    assert_eq!(app.load_ticket(tenant.company.id, ticket.id).await.unread_messages, 1);

    let response = app
        .server
        .post(&format!("/tickets/{}/resolve", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "closed");
    assert_eq!(body["data"]["unreadMessages"], 0);
    assert!(!body["data"]["closedAt"].is_null());

    assert!(app
        .channel
        .bodies()
        .contains(&"Obrigado pelo contato!".to_string()));

    let stored = app.load_ticket(tenant.company.id, ticket.id).await;
    assert_eq!(stored.status, TicketStatus::Closed);
    assert!(stored.flow_stopped);

    let response = app
        .server
        .post(&format!("/tickets/{}/resolve", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_INVALID_TRANSITION");
}

#[tokio::test]
async fn test_customer_message_reopens_closed_ticket() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let agent = app
        .seed_user(tenant.company.id, "agent@acme.test", Profile::User)
        .await;
    let queue = app.seed_queue(tenant.company.id, "Suporte").await;
    let connection = app.seed_connection(tenant.company.id, None).await;
    let contact = app.seed_contact(tenant.company.id, "5511900000001").await;
    let ticket = app
        .seed_ticket(NewTicket {
            company_id: tenant.company.id,
            contact_id: contact.id,
            queue_id: Some(queue.id),
            user_id: Some(agent.id),
            whatsapp_id: Some(connection.id),
        })
        .await;

    let response = app
        .server
        .post(&format!("/tickets/{}/resolve", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .deliver(
            connection.id,
            &json!({ "id": "in-2", "from": "5511900000001@s.whatsapp.net", "body": "voltou a cair" }),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["ticket"]["id"], ticket.id.to_string());

    let reopened = app.load_ticket(tenant.company.id, ticket.id).await;
    assert_eq!(reopened.status, TicketStatus::Pending);
    assert_eq!(reopened.user_id, None);
    assert_eq!(reopened.queue_id, Some(queue.id));
    assert_eq!(reopened.unread_messages, 1);
    assert_eq!(reopened.last_message, "voltou a cair");
}

#[tokio::test]
async fn test_mark_read_resets_unread_counter() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let connection = app.seed_connection(tenant.company.id, None).await;

    for (i, text) in ["oi", "alguém aí?"].iter().enumerate() {
        app.deliver(
            connection.id,
            &json!({ "id": format!("in-{}", i), "from": "5511900000009@s.whatsapp.net", "body": text }),
        )
        .await;
    }

    let response = app
        .server
        .get("/tickets")
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    let body: Value = response.json();
    let tickets = body["data"].as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["unreadMessages"], 2);
    let ticket_id = tickets[0]["id"].as_str().unwrap().to_string();

    let response = app
        .server
        .post(&format!("/tickets/{}/read", ticket_id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["unreadMessages"], 0);

    let response = app
        .server
        .get(&format!("/tickets/{}/messages", ticket_id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    let body: Value = response.json();
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|m| m["read"] == true));
}

#[tokio::test]
async fn test_closed_ticket_cannot_be_transferred() {
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

    app.server
        .post(&format!("/tickets/{}/resolve", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;

    let response = app
        .server
        .put(&format!("/tickets/{}/transfer", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "queueId": queue.id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_ticket_list_filters_by_status() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let first = app.seed_contact(tenant.company.id, "5511900000001").await;
    let second = app.seed_contact(tenant.company.id, "5511900000002").await;
    app.seed_ticket(NewTicket {
        company_id: tenant.company.id,
        contact_id: first.id,
        ..Default::default()
    })
    .await;
    app.seed_ticket(NewTicket {
        company_id: tenant.company.id,
        contact_id: second.id,
        user_id: Some(tenant.admin.id),
        ..Default::default()
    })
    .await;

    let response = app
        .server
        .get("/tickets?status=open")
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let tickets = body["data"].as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["contactId"], second.id.to_string());
}
