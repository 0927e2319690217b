// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::context::AppContext;
use crate::presentation::handlers::{
    auth_handler, billing_handler, channel_handler, company_handler, connection_handler,
    contact_handler, health_handler, message_handler, plan_handler, queue_handler,
    schedule_handler, setting_handler, ticket_handler, user_handler,
};
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};
use crate::presentation::middleware::signature_middleware::{
    signature_middleware, SignatureState,
};
use axum::{
    extract::Extension,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// 公开路由、签名回调路由和令牌保护路由合并后，统一注入领域服务
pub fn app(ctx: AppContext) -> Router {
    let auth_state = AuthState {
        auth: ctx.auth.clone(),
    };
    let channel_signature = SignatureState::new(&ctx.settings.channel.secret);
    let billing_signature = SignatureState::new(&ctx.settings.billing.webhook_secret);

    let public_routes = Router::new()
        .route("/health", get(health_handler::health_check))
        .route("/version", get(health_handler::version))
        .route("/auth/login", post(auth_handler::login));

    let channel_routes = Router::new()
        .route(
            "/channel/{connection_id}/messages",
            post(channel_handler::receive_message),
        )
        .route("/channel/acks", post(channel_handler::receive_ack))
        .route(
            "/channel/{connection_id}/status",
            post(channel_handler::report_status),
        )
        .route_layer(middleware::from_fn_with_state(
            channel_signature,
            signature_middleware,
        ));

    let billing_routes = Router::new()
        .route("/billing/webhook", post(billing_handler::payment_webhook))
        .route_layer(middleware::from_fn_with_state(
            billing_signature,
            signature_middleware,
        ));

    let protected_routes = Router::new()
        .route("/auth/logout", post(auth_handler::logout))
        .route("/auth/me", get(auth_handler::me))
        .route(
            "/users",
            get(user_handler::list_users).post(user_handler::create_user),
        )
        .route("/users/{id}", put(user_handler::update_user))
        .route("/users/{id}/logout", post(user_handler::force_logout))
        .route(
            "/queues",
            get(queue_handler::list_queues).post(queue_handler::create_queue),
        )
        .route(
            "/queues/{id}",
            put(queue_handler::update_queue).delete(queue_handler::delete_queue),
        )
        .route(
            "/contacts",
            get(contact_handler::list_contacts).post(contact_handler::create_contact),
        )
        .route(
            "/connections",
            get(connection_handler::list_connections).post(connection_handler::create_connection),
        )
        .route(
            "/tickets",
            get(ticket_handler::list_tickets).post(ticket_handler::create_ticket),
        )
        .route("/tickets/kanban", get(ticket_handler::kanban))
        .route("/tickets/{id}", get(ticket_handler::show_ticket))
        .route("/tickets/{id}/transfer", put(ticket_handler::transfer_ticket))
        .route("/tickets/{id}/resolve", post(ticket_handler::resolve_ticket))
        .route("/tickets/{id}/read", post(ticket_handler::mark_read))
        .route(
            "/tickets/{id}/messages",
            get(message_handler::list_messages).post(message_handler::send_message),
        )
        .route("/tickets/{id}/transcript", get(message_handler::transcript))
        .route(
            "/tickets/{id}/schedules",
            get(schedule_handler::list_schedules).post(schedule_handler::create_schedule),
        )
        .route("/schedules/{id}", delete(schedule_handler::delete_schedule))
        .route(
            "/plans",
            get(plan_handler::list_plans).post(plan_handler::create_plan),
        )
        .route("/plans/features", get(plan_handler::enabled_features))
        .route(
            "/plans/{id}",
            get(plan_handler::get_plan)
                .put(plan_handler::update_plan)
                .delete(plan_handler::delete_plan),
        )
        .route(
            "/companies",
            get(company_handler::list_companies).post(company_handler::create_company),
        )
        .route("/companies/{id}", get(company_handler::show_company))
        .route(
            "/companies/{id}/invoices",
            post(company_handler::create_invoice),
        )
        .route("/settings", get(setting_handler::list_settings))
        .route("/settings/{key}", put(setting_handler::upsert_setting))
        .route("/invoices", get(billing_handler::list_invoices))
        .route("/invoices/checkout", post(billing_handler::create_checkout))
        .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(channel_routes)
        .merge(billing_routes)
        .merge(protected_routes)
        .layer(Extension(ctx.settings.clone()))
        .layer(Extension(ctx.auth.clone()))
        .layer(Extension(ctx.users.clone()))
        .layer(Extension(ctx.queues.clone()))
        .layer(Extension(ctx.contacts.clone()))
        .layer(Extension(ctx.connections.clone()))
        .layer(Extension(ctx.tickets.clone()))
        .layer(Extension(ctx.messages.clone()))
        .layer(Extension(ctx.plans.clone()))
        .layer(Extension(ctx.companies.clone()))
        .layer(Extension(ctx.settings_store.clone()))
        .layer(Extension(ctx.billing.clone()))
        .layer(Extension(ctx.schedules.clone()))
        .layer(Extension(ctx.inbound.clone()))
        .layer(TraceLayer::new_for_http())
}
