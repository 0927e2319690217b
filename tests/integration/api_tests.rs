// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::TestApp;
use axum::http::StatusCode;

#[tokio::test]
async fn test_health_and_version_are_public() {
    let app = TestApp::spawn().await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");

    let response = app.server.get("/version").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::spawn().await;

    for path in ["/tickets", "/queues", "/users", "/settings", "/invoices"] {
        let response = app.server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{}", path);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "ERR_INVALID_TOKEN");
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::spawn().await;
    let response = app.server.get("/does-not-exist").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
