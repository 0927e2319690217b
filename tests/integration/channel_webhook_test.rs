// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{bearer, TestApp, CHANNEL_SECRET};
use axum::http::StatusCode;
use bytes::Bytes;
use chrono::Utc;
use ispdesk::domain::models::plan::PlanDraft;
use ispdesk::utils::signature::{sign, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use serde_json::{json, Value};

#[tokio::test]
async fn test_unsigned_channel_callbacks_are_rejected() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let connection = app.seed_connection(tenant.company.id, None).await;
    let path = format!("/channel/{}/messages", connection.id);
    let message = json!({ "id": "m-1", "from": "5511900000001@s.whatsapp.net", "body": "oi" });

    let response = app.server.post(&path).json(&message).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_INVALID_SIGNATURE");

    let response = app.post_signed(&path, "not-the-secret", &message).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    // 签名正确但时间戳过旧
    let payload = serde_json::to_vec(&message).unwrap();
    let stale = Utc::now().timestamp() - 3600;
    let response = app
        .server
        .post(&path)
        .add_header("content-type", "application/json")
        .add_header(SIGNATURE_HEADER, sign(CHANNEL_SECRET, stale, &payload))
        .add_header(TIMESTAMP_HEADER, stale.to_string())
        .bytes(Bytes::from(payload))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get("/tickets")
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    let body: Value = response.json();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_tampered_body_fails_verification() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let connection = app.seed_connection(tenant.company.id, None).await;

    let signed = serde_json::to_vec(&json!({ "id": "m-1", "from": "5511900000001", "body": "oi" }))
        .unwrap();
    let sent = serde_json::to_vec(&json!({ "id": "m-1", "from": "5511900000001", "body": "tchau" }))
        .unwrap();
    let timestamp = Utc::now().timestamp();

    let response = app
        .server
        .post(&format!("/channel/{}/messages", connection.id))
        .add_header("content-type", "application/json")
        .add_header(SIGNATURE_HEADER, sign(CHANNEL_SECRET, timestamp, &signed))
        .add_header(TIMESTAMP_HEADER, timestamp.to_string())
        .bytes(Bytes::from(sent))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_connection_status_reports_are_applied() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let connection = app.seed_connection(tenant.company.id, None).await;

    let response = app
        .post_signed(
            &format!("/channel/{}/status", connection.id),
            CHANNEL_SECRET,
            &json!({ "status": "connected" }),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["status"], "connected");

    let response = app
        .server
        .get("/connections")
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["data"][0]["status"], "connected");
}

#[tokio::test]
async fn test_channel_secret_does_not_sign_billing_events() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;

    let response = app
        .post_signed(
            "/billing/webhook",
            CHANNEL_SECRET,
            &json!({
                "companyId": tenant.company.id,
                "invoiceId": uuid::Uuid::new_v4(),
                "status": "paid",
            }),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_out_of_range_timestamp_is_rejected() {
    let app = TestApp::spawn().await;
    let payload = serde_json::to_vec(&json!({ "id": "wamid.0", "ack": 2 })).unwrap();

    for timestamp in [i64::MIN, i64::MAX] {
        let response = app
            .server
            .post("/channel/acks")
            .add_header("content-type", "application/json")
            .add_header(SIGNATURE_HEADER, sign(CHANNEL_SECRET, timestamp, &payload))
            .add_header(TIMESTAMP_HEADER, timestamp.to_string())
            .bytes(Bytes::from(payload.clone()))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["error"], "ERR_INVALID_SIGNATURE");
    }
}
