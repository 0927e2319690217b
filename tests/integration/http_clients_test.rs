// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use ispdesk::domain::services::ai_service::{AiProvider, ChatRole, ChatTurn};
use ispdesk::domain::services::channel_service::{ChannelService, OutboundMessage};
use ispdesk::domain::services::payment_gateway::{CheckoutRequest, PaymentGateway};
use ispdesk::infrastructure::services::ai_service_impl::OpenAiProvider;
use ispdesk::infrastructure::services::channel_service_impl::HttpChannelService;
use ispdesk::infrastructure::services::payment_gateway_impl::HttpPaymentGateway;
use ispdesk::utils::signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn outbound() -> OutboundMessage {
    OutboundMessage {
        company_id: Uuid::new_v4(),
        connection_id: Some(Uuid::new_v4()),
        ticket_id: Uuid::new_v4(),
        number: "5511987654321".to_string(),
        is_group: false,
        body: "Seu técnico chega às 14h".to_string(),
        quoted_msg_id: None,
    }
}

#[tokio::test]
async fn test_channel_client_signs_request_and_returns_delivery_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header_exists(SIGNATURE_HEADER))
        .and(header_exists(TIMESTAMP_HEADER))
        .and(body_partial_json(json!({ "number": "5511987654321", "isGroup": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "wamid.HBgM" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpChannelService::new(
        format!("{}/messages", server.uri()),
        "gateway-secret".to_string(),
        5,
    );
    let id = client.send_message(&outbound()).await.unwrap();
    assert_eq!(id, "wamid.HBgM");
}

#[tokio::test]
async fn test_channel_client_reports_gateway_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("offline"))
        .mount(&server)
        .await;

    let client = HttpChannelService::new(server.uri(), "gateway-secret".to_string(), 5);
    let err = client.send_message(&outbound()).await.unwrap_err();
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_openai_client_sends_history_and_parses_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "messages": [
                { "role": "system", "content": "Seja cordial" },
                { "role": "user", "content": "oi" },
                { "role": "assistant", "content": "Olá!" },
                { "role": "user", "content": "minha internet caiu" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "  Vou verificar.  " } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new(
        Some("sk-test".to_string()),
        "gpt-4o-mini".to_string(),
        format!("{}/v1/", server.uri()),
        5,
    );
    let history = vec![
        ChatTurn {
            role: ChatRole::User,
            content: "oi".to_string(),
        },
        ChatTurn {
            role: ChatRole::Assistant,
            content: "Olá!".to_string(),
        },
    ];

    let reply = provider
        .complete("minha internet caiu", &history, "Seja cordial")
        .await
        .unwrap();
    assert_eq!(reply, "Vou verificar.");
}

#[tokio::test]
async fn test_openai_client_requires_api_key() {
    let provider = OpenAiProvider::new(
        None,
        "gpt-4o-mini".to_string(),
        "http://127.0.0.1:9".to_string(),
        1,
    );
    assert!(provider.complete("oi", &[], "").await.is_err());
}

#[tokio::test]
async fn test_openai_client_rejects_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let provider = OpenAiProvider::new(
        Some("sk-test".to_string()),
        "gpt-4o-mini".to_string(),
        server.uri(),
        5,
    );
    assert!(provider.complete("oi", &[], "").await.is_err());
}

#[tokio::test]
async fn test_payment_gateway_returns_checkout_url() {
    let server = MockServer::start().await;
    let request = CheckoutRequest {
        company_id: Uuid::new_v4(),
        plan_id: Uuid::new_v4(),
        invoice_id: Uuid::new_v4(),
        amount_cents: 19_900,
        method: "pix".to_string(),
        description: "Plano Pro".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/checkout"))
        .and(header_exists(SIGNATURE_HEADER))
        .and(body_partial_json(json!({
            "invoiceId": request.invoice_id,
            "amountCents": 19_900,
            "method": "pix"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "url": "https://pay.test/s/abc" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpPaymentGateway::new(
        format!("{}/checkout", server.uri()),
        "billing-secret".to_string(),
    );
    let url = gateway.create_checkout_session(&request).await.unwrap();
    assert_eq!(url, "https://pay.test/s/abc");
}

#[tokio::test]
async fn test_payment_gateway_errors_propagate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let gateway = HttpPaymentGateway::new(server.uri(), "billing-secret".to_string());
    let request = CheckoutRequest {
        company_id: Uuid::new_v4(),
        plan_id: Uuid::new_v4(),
        invoice_id: Uuid::new_v4(),
        amount_cents: 100,
        method: "card".to_string(),
        description: "Plano".to_string(),
    };
    assert!(gateway.create_checkout_session(&request).await.is_err());
}
