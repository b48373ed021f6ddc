//! Persisted notification record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

use guildnet_core::types::{MessageId, NotificationId, PostId, UserId};

use super::event::{Actor, NotificationEvent};
use super::kind::NotificationKind;

/// Reference to the object an action was performed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum SubjectRef {
    /// A post (likes, comments, shares).
    Post(PostId),
    /// A direct message.
    Message(MessageId),
}

impl SubjectRef {
    /// Split into the `(subject_type, subject_id)` column pair.
    pub fn as_parts(&self) -> (&'static str, Uuid) {
        match self {
            Self::Post(id) => ("post", id.into_uuid()),
            Self::Message(id) => ("message", id.into_uuid()),
        }
    }

    /// Rebuild from the `(subject_type, subject_id)` column pair.
    pub fn from_parts(subject_type: Option<&str>, subject_id: Option<Uuid>) -> Option<Self> {
        match (subject_type, subject_id) {
            (Some("post"), Some(id)) => Some(Self::Post(PostId::from_uuid(id))),
            (Some("message"), Some(id)) => Some(Self::Message(MessageId::from_uuid(id))),
            _ => None,
        }
    }
}

/// A notification as stored in a recipient's inbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Store-assigned identifier, unique within the recipient's inbox.
    pub id: NotificationId,
    /// The inbox owner.
    pub recipient_id: UserId,
    /// What happened.
    pub kind: NotificationKind,
    /// The user who performed the action.
    pub actor: Actor,
    /// The acted-upon object, if any.
    pub subject_ref: Option<SubjectRef>,
    /// Rendered human-readable message.
    pub message: String,
    /// Whether the recipient has read this notification.
    pub read: bool,
    /// Whether the paired mail queue entry was enqueued.
    pub email_dispatched: bool,
    /// Store-assigned creation timestamp, non-decreasing per inbox.
    pub created_at: DateTime<Utc>,
}

impl FromRow<'_, PgRow> for NotificationRecord {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let subject_type: Option<String> = row.try_get("subject_type")?;
        let subject_id: Option<Uuid> = row.try_get("subject_id")?;

        Ok(Self {
            id: row.try_get("id")?,
            recipient_id: row.try_get("recipient_id")?,
            kind: row.try_get("kind")?,
            actor: Actor {
                id: row.try_get("actor_id")?,
                display_name: row.try_get("actor_name")?,
                avatar_url: row.try_get("actor_avatar_url")?,
            },
            subject_ref: SubjectRef::from_parts(subject_type.as_deref(), subject_id),
            message: row.try_get("message")?,
            read: row.try_get("is_read")?,
            email_dispatched: row.try_get("email_dispatched")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Insert payload for a new notification.
///
/// The store assigns `id` and `created_at`; `read` and `email_dispatched`
/// always start out false.
#[derive(Debug, Clone)]
pub struct NewNotification {
    /// The inbox owner.
    pub recipient_id: UserId,
    /// What happened.
    pub kind: NotificationKind,
    /// The user who performed the action.
    pub actor: Actor,
    /// The acted-upon object, if any.
    pub subject_ref: Option<SubjectRef>,
    /// Rendered human-readable message.
    pub message: String,
}

impl NewNotification {
    /// Build the insert payload from a classified event.
    pub fn from_event(event: &NotificationEvent) -> Self {
        Self {
            recipient_id: event.recipient_id,
            kind: event.kind,
            actor: event.actor.clone(),
            subject_ref: event.subject_ref,
            message: event.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_ref_parts_roundtrip() {
        let id = PostId::new();
        let subject = SubjectRef::Post(id);
        let (kind, uuid) = subject.as_parts();
        assert_eq!(SubjectRef::from_parts(Some(kind), Some(uuid)), Some(subject));
    }

    #[test]
    fn test_subject_ref_from_incomplete_parts() {
        assert_eq!(SubjectRef::from_parts(None, None), None);
        assert_eq!(SubjectRef::from_parts(Some("post"), None), None);
        assert_eq!(
            SubjectRef::from_parts(Some("unknown"), Some(Uuid::new_v4())),
            None
        );
    }

    #[test]
    fn test_subject_ref_serde_tagging() {
        let subject = SubjectRef::Message(MessageId::new());
        let value = serde_json::to_value(subject).expect("serialize");
        assert_eq!(value["type"], "message");
    }
}
