//! Request DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use guildnet_core::error::AppError;
use guildnet_core::types::{MessageId, NotificationId, PostId, UserId};
use guildnet_entity::notification::NotificationKind;
use guildnet_entity::user::UserProfile;
use guildnet_notify::Action;

/// A resolved user profile as forwarded by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfilePayload {
    /// The user's id.
    pub id: UserId,
    /// Display name used in rendered messages.
    #[validate(length(max = 120))]
    pub display_name: String,
    /// Avatar image URL, if set.
    #[validate(url)]
    pub avatar_url: Option<String>,
    /// Email address for the mail channel, if known.
    #[validate(email)]
    pub email: Option<String>,
}

impl From<ProfilePayload> for UserProfile {
    fn from(payload: ProfilePayload) -> Self {
        Self {
            id: payload.id,
            display_name: payload.display_name,
            avatar_url: payload.avatar_url,
            email: payload.email,
        }
    }
}

/// POST /api/events — a user action to classify and fan out.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PublishEventRequest {
    /// The action kind.
    pub kind: NotificationKind,
    /// The user who performed the action.
    #[validate(nested)]
    pub actor: ProfilePayload,
    /// The user whose content was acted on (the notification recipient).
    #[validate(nested)]
    pub target: ProfilePayload,
    /// The post acted on. Required for like, comment, and share.
    pub post_id: Option<PostId>,
    /// The message sent. Required for message.
    pub message_id: Option<MessageId>,
}

impl PublishEventRequest {
    /// Build the typed action, checking that the subject matches the kind.
    pub fn action(&self) -> Result<Action, AppError> {
        match self.kind {
            NotificationKind::Like => self
                .post_id
                .map(|post_id| Action::Like { post_id })
                .ok_or_else(|| AppError::validation("post_id is required for kind 'like'")),
            NotificationKind::Comment => self
                .post_id
                .map(|post_id| Action::Comment { post_id })
                .ok_or_else(|| AppError::validation("post_id is required for kind 'comment'")),
            NotificationKind::Share => self
                .post_id
                .map(|post_id| Action::Share { post_id })
                .ok_or_else(|| AppError::validation("post_id is required for kind 'share'")),
            NotificationKind::FriendRequest => Ok(Action::FriendRequest),
            NotificationKind::Message => self
                .message_id
                .map(|message_id| Action::Message { message_id })
                .ok_or_else(|| AppError::validation("message_id is required for kind 'message'")),
        }
    }
}

/// PUT /api/notifications/read — batch read marking.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MarkReadRequest {
    /// Ids to mark read. Unknown ids are silently accepted.
    #[validate(length(min = 1, max = 500))]
    pub ids: Vec<NotificationId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str) -> ProfilePayload {
        ProfilePayload {
            id: UserId::new(),
            display_name: name.to_string(),
            avatar_url: None,
            email: None,
        }
    }

    #[test]
    fn test_subject_required_per_kind() {
        let request = PublishEventRequest {
            kind: NotificationKind::Like,
            actor: payload("valkyrie"),
            target: payload("bastion"),
            post_id: None,
            message_id: None,
        };
        assert!(request.action().is_err());

        let request = PublishEventRequest {
            post_id: Some(PostId::new()),
            ..request
        };
        assert!(matches!(request.action(), Ok(Action::Like { .. })));
    }

    #[test]
    fn test_friend_request_needs_no_subject() {
        let request = PublishEventRequest {
            kind: NotificationKind::FriendRequest,
            actor: payload("valkyrie"),
            target: payload("bastion"),
            post_id: None,
            message_id: None,
        };
        assert!(matches!(request.action(), Ok(Action::FriendRequest)));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut profile = payload("valkyrie");
        profile.email = Some("not-an-email".to_string());
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_empty_mark_read_rejected() {
        let request = MarkReadRequest { ids: Vec::new() };
        assert!(request.validate().is_err());
    }
}
