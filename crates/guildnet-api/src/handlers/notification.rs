//! Inbox and read-state handlers.

use axum::Json;
use axum::extract::{Query, State};
use validator::Validate;

use guildnet_core::error::AppError;
use guildnet_core::types::PageResponse;
use guildnet_entity::notification::NotificationRecord;

use crate::dto::request::MarkReadRequest;
use crate::dto::response::{ApiResponse, CountResponse, MarkedResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<NotificationRecord>>>, ApiError> {
    let page = state
        .notifications
        .list_inbox_page(auth.user_id(), &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.notifications.unread_count(auth.user_id()).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// PUT /api/notifications/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<MarkReadRequest>,
) -> Result<Json<ApiResponse<MarkedResponse>>, ApiError> {
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let marked = state
        .notifications
        .mark_read(auth.user_id(), &request.ids)
        .await?;
    Ok(Json(ApiResponse::ok(MarkedResponse { marked })))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MarkedResponse>>, ApiError> {
    let marked = state.notifications.mark_all_read(auth.user_id()).await?;
    Ok(Json(ApiResponse::ok(MarkedResponse { marked })))
}
