// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{bearer, TestApp, BILLING_SECRET, PASSWORD};
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use ispdesk::domain::models::plan::PlanDraft;
use serde_json::{json, Value};
use std::sync::atomic::Ordering;

fn pro_plan() -> PlanDraft {
    PlanDraft {
        name: "Pro".to_string(),
        amount_cents: 19_900,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_checkout_issues_invoice_and_returns_gateway_url() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", pro_plan()).await;

    let response = app
        .server
        .post("/invoices/checkout")
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "method": "pix" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    let invoice_id = body["data"]["invoiceId"].as_str().unwrap().to_string();
    assert_eq!(
        body["data"]["url"],
        format!("https://pay.example.test/{}", invoice_id)
    );

    let requests = app.payments.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount_cents, 19_900);
    assert_eq!(requests[0].method, "pix");
    assert_eq!(requests[0].company_id, tenant.company.id);

    let response = app
        .server
        .get("/invoices")
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    let body: Value = response.json();
    let invoices = body["data"].as_array().unwrap();
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0]["status"], "open");
}

#[tokio::test]
async fn test_gateway_failure_surfaces_as_bad_gateway() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", pro_plan()).await;
    app.payments.fail.store(true, Ordering::SeqCst);

    let response = app
        .server
        .post("/invoices/checkout")
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "method": "card" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_EXTERNAL_DEPENDENCY");
}

#[tokio::test]
async fn test_blocked_company_is_read_only_until_paid() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", pro_plan()).await;
    app.block_company(&tenant.company).await;

    let response = app
        .server
        .post("/queues")
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "name": "Suporte", "color": "#123456" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::PAYMENT_REQUIRED);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_COMPANY_BLOCKED");

    let response = app
        .server
        .get("/queues")
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // 冻结期间仍然可以付款
    let response = app
        .server
        .post("/invoices/checkout")
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "method": "pix" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    let invoice_id = body["data"]["invoiceId"].as_str().unwrap().to_string();

    let response = app
        .post_signed(
            "/billing/webhook",
            BILLING_SECRET,
            &json!({ "companyId": tenant.company.id, "invoiceId": invoice_id, "status": "paid" }),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "paid");
    assert!(app.load_company(tenant.company.id).await.status);

    let response = app
        .server
        .post("/queues")
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "name": "Suporte", "color": "#123456" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_payment_confirmation_is_idempotent() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", pro_plan()).await;
    let original_due = app.load_company(tenant.company.id).await.due_date.unwrap();

    let response = app
        .server
        .post("/invoices/checkout")
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "method": "boleto" }))
        .await;
    let body: Value = response.json();
    let invoice_id = body["data"]["invoiceId"].as_str().unwrap().to_string();
    let event = json!({ "companyId": tenant.company.id, "invoiceId": invoice_id, "status": "paid" });

    let response = app.post_signed("/billing/webhook", BILLING_SECRET, &event).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let renewed_due = app.load_company(tenant.company.id).await.due_date.unwrap();
    assert!(renewed_due >= original_due + Duration::days(29));

    let response = app.post_signed("/billing/webhook", BILLING_SECRET, &event).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        app.load_company(tenant.company.id).await.due_date.unwrap(),
        renewed_due
    );
}

#[tokio::test]
async fn test_webhook_ignores_other_events_and_rejects_unsigned_calls() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", pro_plan()).await;
    let event = json!({
        "companyId": tenant.company.id,
        "invoiceId": uuid::Uuid::new_v4(),
        "status": "failed",
    });

    let response = app.server.post("/billing/webhook").json(&event).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_INVALID_SIGNATURE");

    let response = app.post_signed("/billing/webhook", "wrong-secret", &event).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app.post_signed("/billing/webhook", BILLING_SECRET, &event).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_dunning_blocks_companies_past_grace() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", pro_plan()).await;
    let (_, root_token) = app.seed_super_admin(tenant.company.id).await;

    let response = app
        .server
        .post(&format!("/companies/{}/invoices", tenant.company.id))
        .add_header("Authorization", bearer(&root_token))
        .json(&json!({
            "detail": "Mensalidade",
            "valueCents": 19_900,
            "dueDate": Utc::now() - Duration::days(1),
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    // 到期时间在宽限期之外
    let report = app
        .ctx
        .billing
        .run_dunning(Utc::now() + Duration::days(40))
        .await
        .unwrap();
    assert_eq!(report.overdue_invoices, 1);
    assert_eq!(report.blocked_companies, vec![tenant.company.id]);
    assert!(!app.load_company(tenant.company.id).await.status);

    let response = app
        .server
        .get("/invoices")
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"][0]["status"], "overdue");
}

#[tokio::test]
async fn test_super_admin_creates_company_with_admin() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", pro_plan()).await;
    let (_, root_token) = app.seed_super_admin(tenant.company.id).await;

    let signup = json!({
        "name": "Gama Telecom",
        "planId": tenant.plan.id,
        "adminName": "Gabriela",
        "adminEmail": "gabriela@gama.test",
        "adminPassword": PASSWORD,
    });

    let response = app
        .server
        .post("/companies")
        .add_header("Authorization", bearer(&tenant.token))
        .json(&signup)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = app
        .server
        .post("/companies")
        .add_header("Authorization", bearer(&root_token))
        .json(&signup)
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["company"]["name"], "Gama Telecom");
    assert_eq!(body["data"]["admin"]["profile"], "admin");

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({ "email": "gabriela@gama.test", "password": PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}
