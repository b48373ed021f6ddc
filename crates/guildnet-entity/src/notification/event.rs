//! Ephemeral notification events.
//!
//! A [`NotificationEvent`] is constructed per user action by the classifier
//! and consumed by the fan-out dispatcher. It is never persisted as-is; the
//! dispatcher copies its fields into a [`super::NotificationRecord`] and
//! serializes the whole event as mail template data.

use serde::{Deserialize, Serialize};

use guildnet_core::types::UserId;

use super::kind::NotificationKind;
use super::model::SubjectRef;
use crate::user::UserProfile;

/// The user who performed the action, as embedded in notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting user's ID.
    pub id: UserId,
    /// Display name shown in the rendered message.
    pub display_name: String,
    /// Avatar image URL, if the user has one.
    pub avatar_url: Option<String>,
}

impl From<&UserProfile> for Actor {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id,
            display_name: profile.display_name.clone(),
            avatar_url: profile.avatar_url.clone(),
        }
    }
}

/// A classified user action, ready for fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// What happened.
    pub kind: NotificationKind,
    /// The user who should be notified.
    pub recipient_id: UserId,
    /// Contact address for the email channel, if resolvable.
    pub recipient_email: Option<String>,
    /// The user who performed the action.
    pub actor: Actor,
    /// The acted-upon object. Always `None` for friend requests.
    pub subject_ref: Option<SubjectRef>,
    /// Human-readable description, e.g. "{actor} liked your post".
    pub message: String,
}
