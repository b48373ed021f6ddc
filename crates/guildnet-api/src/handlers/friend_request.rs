//! Friend-request consumption handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use guildnet_core::types::UserId;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/friend-requests/{actor_id}/accept
pub async fn accept(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(actor_id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    state
        .notifications
        .accept_friend_request(auth.user_id(), UserId::from_uuid(actor_id))
        .await?;
    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "message": "Friend request accepted" }),
    )))
}

/// POST /api/friend-requests/{actor_id}/reject
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(actor_id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    state
        .notifications
        .reject_friend_request(auth.user_id(), UserId::from_uuid(actor_id))
        .await?;
    Ok(Json(ApiResponse::ok(
        serde_json::json!({ "message": "Friend request rejected" }),
    )))
}
