// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{bearer, Tenant, TestApp};
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use ispdesk::domain::models::plan::PlanDraft;
use ispdesk::domain::models::schedule::{Schedule, ScheduleStatus};
use ispdesk::domain::repositories::schedule_repository::ScheduleRepository;
use ispdesk::domain::services::schedule_service::DispatchStats;
use ispdesk::infrastructure::repositories::schedule_repo_impl::ScheduleRepositoryImpl;
use ispdesk::domain::models::ticket::{NewTicket, Ticket};
use serde_json::{json, Value};

async fn setup(app: &TestApp) -> (Tenant, Ticket) {
    let tenant = app
        .seed_tenant(
            "Acme Fibra",
            PlanDraft {
                use_schedules: true,
                ..Default::default()
            },
        )
        .await;
    let connection = app.seed_connection(tenant.company.id, None).await;
    let contact = app.seed_contact(tenant.company.id, "5511900000001").await;
    let ticket = app
        .seed_ticket(NewTicket {
            company_id: tenant.company.id,
            contact_id: contact.id,
            whatsapp_id: Some(connection.id),
            ..Default::default()
        })
        .await;
    (tenant, ticket)
}

#[tokio::test]
async fn test_schedule_in_the_past_is_rejected() {
    let app = TestApp::spawn().await;
    let (tenant, ticket) = setup(&app).await;

    let response = app
        .server
        .post(&format!("/tickets/{}/schedules", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "body": "Lembrete", "sendAt": Utc::now() - Duration::minutes(5) }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_VALIDATION");
}

#[tokio::test]
async fn test_pending_schedule_can_be_listed_and_deleted() {
    let app = TestApp::spawn().await;
    let (tenant, ticket) = setup(&app).await;

    let response = app
        .server
        .post(&format!("/tickets/{}/schedules", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "body": "Sua fatura vence amanhã", "sendAt": Utc::now() + Duration::hours(2) }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "pending");
    let schedule_id = body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .server
        .get(&format!("/tickets/{}/schedules", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = app
        .server
        .delete(&format!("/schedules/{}", schedule_id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = app
        .server
        .delete(&format!("/schedules/{}", schedule_id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_NO_SCHEDULE_FOUND");
}

#[tokio::test]
async fn test_due_schedules_are_sent_once() {
    let app = TestApp::spawn().await;
    let (tenant, ticket) = setup(&app).await;

    let response = app
        .server
        .post(&format!("/tickets/{}/schedules", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "body": "Técnico a caminho", "sendAt": Utc::now() + Duration::minutes(1) }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    // 还没到时间
    let stats = app.ctx.schedules.dispatch_due(Utc::now(), 50).await.unwrap();
    assert_eq!(stats.sent + stats.failed, 0);

    let later = Utc::now() + Duration::minutes(5);
    let stats = app.ctx.schedules.dispatch_due(later, 50).await.unwrap();
    assert_eq!(stats.sent, 1);
    assert_eq!(app.channel.bodies(), vec!["Técnico a caminho".to_string()]);

    let stats = app.ctx.schedules.dispatch_due(later, 50).await.unwrap();
    assert_eq!(stats.sent + stats.failed, 0);

    let response = app
        .server
        .get(&format!("/tickets/{}/schedules", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"][0]["status"], "sent");
    assert!(!body["data"][0]["sentAt"].is_null());
}

#[tokio::test]
async fn test_channel_failure_marks_schedule_failed() {
    let app = TestApp::spawn().await;
    let (tenant, ticket) = setup(&app).await;
    app.channel.set_failing(true);

    app.server
        .post(&format!("/tickets/{}/schedules", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "body": "Lembrete", "sendAt": Utc::now() + Duration::minutes(1) }))
        .await;

    let stats = app
        .ctx
        .schedules
        .dispatch_due(Utc::now() + Duration::minutes(5), 50)
        .await
        .unwrap();
    assert_eq!(stats.failed, 1);

    let response = app
        .server
        .get(&format!("/tickets/{}/schedules", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"][0]["status"], "failed");

    // 消息仍然保留在工单中
    let response = app
        .server
        .get(&format!("/tickets/{}/messages", ticket.id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

fn due_schedule(ticket: &Ticket, company_id: uuid::Uuid, body: &str) -> Schedule {
    let now = Utc::now();
    Schedule::new(
        company_id,
        ticket.id,
        ticket.contact_id,
        None,
        body.to_string(),
        now + Duration::minutes(1),
        now,
    )
    .unwrap()
}

#[tokio::test]
async fn test_schedule_claimed_by_another_run_is_not_sent_again() {
    let app = TestApp::spawn().await;
    let (tenant, ticket) = setup(&app).await;
    let repo = ScheduleRepositoryImpl::new(app.db.clone());

    let claimed = repo
        .create(&due_schedule(&ticket, tenant.company.id, "Outro worker"))
        .await
        .unwrap();
    repo.create(&due_schedule(&ticket, tenant.company.id, "Lembrete"))
        .await
        .unwrap();

    let later = Utc::now() + Duration::minutes(5);
    assert!(repo.claim(claimed.id, later).await.unwrap());
    assert!(!repo.claim(claimed.id, later).await.unwrap());

    let stats = app.ctx.schedules.dispatch_due(later, 50).await.unwrap();
    assert_eq!(stats, DispatchStats { sent: 1, failed: 0 });
    assert_eq!(app.channel.bodies(), vec!["Lembrete".to_string()]);

    let schedules = repo.list_for_ticket(tenant.company.id, ticket.id).await.unwrap();
    let held = schedules.iter().find(|s| s.id == claimed.id).unwrap();
    assert_eq!(held.status, ScheduleStatus::Processing);
}

#[tokio::test]
async fn test_failing_schedule_does_not_stop_the_batch() {
    let app = TestApp::spawn().await;
    let (tenant, ticket) = setup(&app).await;
    let other = app.seed_tenant("Outra ISP", PlanDraft::default()).await;
    let repo = ScheduleRepositoryImpl::new(app.db.clone());

    // 工单不属于该租户，发送时找不到
    let orphan = repo
        .create(&due_schedule(&ticket, other.company.id, "Perdido"))
        .await
        .unwrap();
    repo.create(&due_schedule(&ticket, tenant.company.id, "Entregue"))
        .await
        .unwrap();

    let stats = app
        .ctx
        .schedules
        .dispatch_due(Utc::now() + Duration::minutes(5), 50)
        .await
        .unwrap();
    assert_eq!(stats, DispatchStats { sent: 1, failed: 1 });
    assert_eq!(app.channel.bodies(), vec!["Entregue".to_string()]);

    let orphan = repo
        .list_for_ticket(other.company.id, ticket.id)
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.id == orphan.id)
        .unwrap();
    assert_eq!(orphan.status, ScheduleStatus::Failed);
}
