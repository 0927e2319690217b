// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{bearer, TestApp, PASSWORD};
use axum::http::StatusCode;
use ispdesk::domain::models::plan::PlanDraft;
use ispdesk::domain::models::user::Profile;
use serde_json::{json, Value};

#[tokio::test]
async fn test_login_returns_token_usable_on_protected_routes() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({ "email": "ADMIN@acme-fibra.test", "password": PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    let token = body["data"]["token"].as_str().unwrap().to_string();
    assert!(body["data"]["user"].get("passwordHash").is_none());

    let response = app
        .server
        .get("/auth/me")
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["id"], tenant.admin.id.to_string());
}

#[tokio::test]
async fn test_login_rejects_bad_password() {
    let app = TestApp::spawn().await;
    app.seed_tenant("Acme Fibra", PlanDraft::default()).await;

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({ "email": "admin@acme-fibra.test", "password": "wrong-password" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_shared_email_requires_company_id() {
    let app = TestApp::spawn().await;
    let a = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let b = app.seed_tenant("Beta Net", PlanDraft::default()).await;
    app.seed_user(a.company.id, "suporte@shared.test", Profile::User)
        .await;
    let agent_b = app
        .seed_user(b.company.id, "suporte@shared.test", Profile::User)
        .await;

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({ "email": "suporte@shared.test", "password": PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_COMPANY_REQUIRED");

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({
            "email": "suporte@shared.test",
            "password": PASSWORD,
            "companyId": b.company.id,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["user"]["id"], agent_b.id.to_string());
}

#[tokio::test]
async fn test_logout_invalidates_existing_tokens() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;

    let response = app
        .server
        .post("/auth/logout")
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .server
        .get("/auth/me")
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_STALE_TOKEN");
}

#[tokio::test]
async fn test_deactivating_user_revokes_sessions() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let agent = app
        .seed_user(tenant.company.id, "agent@acme.test", Profile::User)
        .await;
    let agent_token = app.token_for(&agent);

    let response = app
        .server
        .put(&format!("/users/{}", agent.id))
        .add_header("Authorization", bearer(&tenant.token))
        .json(&json!({ "active": false }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .server
        .get("/tickets")
        .add_header("Authorization", bearer(&agent_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({ "email": "agent@acme.test", "password": PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_force_logout_requires_admin() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let agent = app
        .seed_user(tenant.company.id, "agent@acme.test", Profile::User)
        .await;
    let agent_token = app.token_for(&agent);

    let response = app
        .server
        .post(&format!("/users/{}/logout", tenant.admin.id))
        .add_header("Authorization", bearer(&agent_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error"], "ERR_NO_PERMISSION");

    let response = app
        .server
        .post(&format!("/users/{}/logout", agent.id))
        .add_header("Authorization", bearer(&tenant.token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .server
        .get("/auth/me")
        .add_header("Authorization", bearer(&agent_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_can_rename_self_but_not_promote() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_tenant("Acme Fibra", PlanDraft::default()).await;
    let agent = app
        .seed_user(tenant.company.id, "agent@acme.test", Profile::User)
        .await;
    let agent_token = app.token_for(&agent);

    let response = app
        .server
        .put(&format!("/users/{}", agent.id))
        .add_header("Authorization", bearer(&agent_token))
        .json(&json!({ "name": "Agente Renomeado" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["name"], "Agente Renomeado");

    let response = app
        .server
        .put(&format!("/users/{}", agent.id))
        .add_header("Authorization", bearer(&agent_token))
        .json(&json!({ "profile": "admin" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}
