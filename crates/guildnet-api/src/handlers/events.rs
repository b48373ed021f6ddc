//! Event ingestion handler.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use guildnet_core::error::AppError;

use crate::dto::request::PublishEventRequest;
use crate::dto::response::{ApiResponse, DispatchResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/events
///
/// Classifies and fans out one user action. Suppressed events come back as
/// a success with `delivered: false` — suppression is a policy outcome,
/// not an error.
pub async fn publish_event(
    State(state): State<AppState>,
    Json(request): Json<PublishEventRequest>,
) -> Result<Json<ApiResponse<DispatchResponse>>, ApiError> {
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let action = request.action()?;
    let outcome = state
        .notifications
        .publish(action, &request.actor.into(), &request.target.into())
        .await?;

    Ok(Json(ApiResponse::ok(outcome.into())))
}
