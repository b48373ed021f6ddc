//! Notification kind enumeration.

use serde::{Deserialize, Serialize};

/// The five user actions that can produce a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone liked the recipient's post.
    Like,
    /// Someone commented on the recipient's post.
    Comment,
    /// Someone shared the recipient's post.
    Share,
    /// Someone sent the recipient a friend request.
    FriendRequest,
    /// Someone sent the recipient a direct message.
    Message,
}

impl NotificationKind {
    /// Return the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Comment => "comment",
            Self::Share => "share",
            Self::FriendRequest => "friend_request",
            Self::Message => "message",
        }
    }

    /// Mail template name for this kind (lower-cased kind, as consumed by
    /// the external relay's template set).
    pub fn template_name(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_names_are_lowercase() {
        for kind in [
            NotificationKind::Like,
            NotificationKind::Comment,
            NotificationKind::Share,
            NotificationKind::FriendRequest,
            NotificationKind::Message,
        ] {
            let name = kind.template_name();
            assert_eq!(name, name.to_lowercase());
        }
    }

    #[test]
    fn test_serde_representation() {
        let json = serde_json::to_string(&NotificationKind::FriendRequest).expect("serialize");
        assert_eq!(json, "\"friend_request\"");
    }
}
