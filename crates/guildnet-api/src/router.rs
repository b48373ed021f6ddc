//! Route definitions for the GuildNet notification API.
//!
//! All REST routes are mounted under `/api`; the WebSocket inbox stream
//! lives at `/ws`. The router receives `AppState` and passes it to all
//! handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(event_routes())
        .merge(notification_routes())
        .merge(friend_request_routes())
        .merge(health_routes());

    let ws_routes = Router::new().route("/ws", get(handlers::ws::ws_upgrade));

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .with_state(state)
}

/// Event ingestion.
fn event_routes() -> Router<AppState> {
    Router::new().route("/events", post(handlers::events::publish_event))
}

/// Inbox listing and read state.
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route("/notifications/read", put(handlers::notification::mark_read))
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
}

/// Friend-request consumption.
fn friend_request_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/friend-requests/{actor_id}/accept",
            post(handlers::friend_request::accept),
        )
        .route(
            "/friend-requests/{actor_id}/reject",
            post(handlers::friend_request::reject),
        )
}

/// Health check.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
