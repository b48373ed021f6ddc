//! `AuthUser` extractor — the caller identity forwarded by the identity
//! gateway.
//!
//! The notification service sits behind GuildNet's identity gateway, which
//! authenticates every request and forwards the caller's user id in the
//! `x-guildnet-user` header. The service trusts that header; it is not
//! reachable from outside the gateway.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use guildnet_core::error::AppError;
use guildnet_core::types::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the authenticated caller's user id.
pub const USER_HEADER: &str = "x-guildnet-user";

/// Extracted caller identity, available in handlers.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserId);

impl AuthUser {
    /// The caller's user id.
    pub fn user_id(&self) -> UserId {
        self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError(AppError::validation(format!("Missing {USER_HEADER} header")))
            })?;

        let id = Uuid::parse_str(header).map_err(|_| {
            ApiError(AppError::validation(format!(
                "Invalid user id in {USER_HEADER} header"
            )))
        })?;

        Ok(AuthUser(UserId::from_uuid(id)))
    }
}
