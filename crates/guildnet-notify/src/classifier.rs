//! Event classification — maps raw user actions to canonical events.

use tracing::debug;

use guildnet_core::types::{MessageId, PostId};
use guildnet_entity::notification::{
    Actor, NotificationEvent, NotificationKind, SubjectRef,
};
use guildnet_entity::user::UserProfile;

/// A raw user action, tagged by kind and carrying its subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The actor liked the target's post.
    Like {
        /// The liked post.
        post_id: PostId,
    },
    /// The actor commented on the target's post.
    Comment {
        /// The commented post.
        post_id: PostId,
    },
    /// The actor shared the target's post.
    Share {
        /// The shared post.
        post_id: PostId,
    },
    /// The actor sent the target a friend request. No subject.
    FriendRequest,
    /// The actor sent the target a direct message.
    Message {
        /// The message document.
        message_id: MessageId,
    },
}

impl Action {
    /// The notification kind this action produces.
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Like { .. } => NotificationKind::Like,
            Self::Comment { .. } => NotificationKind::Comment,
            Self::Share { .. } => NotificationKind::Share,
            Self::FriendRequest => NotificationKind::FriendRequest,
            Self::Message { .. } => NotificationKind::Message,
        }
    }

    /// Reference to the acted-upon object, if the kind has one.
    pub fn subject_ref(&self) -> Option<SubjectRef> {
        match self {
            Self::Like { post_id } | Self::Comment { post_id } | Self::Share { post_id } => {
                Some(SubjectRef::Post(*post_id))
            }
            Self::Message { message_id } => Some(SubjectRef::Message(*message_id)),
            Self::FriendRequest => None,
        }
    }
}

/// Builds [`NotificationEvent`]s from actions and resolved profiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventClassifier;

impl EventClassifier {
    /// Classify an action into an event, or `None` when no notification
    /// should be constructed.
    ///
    /// Returns `None` for self-actions (likes, comments, shares, and
    /// messages against the actor's own content) and when the actor
    /// identity is unresolvable — a data-integrity condition the caller
    /// logs and proceeds past; the triggering action itself still succeeds.
    pub fn classify(
        &self,
        action: &Action,
        actor: &UserProfile,
        target: &UserProfile,
    ) -> Option<NotificationEvent> {
        let kind = action.kind();

        if kind != NotificationKind::FriendRequest && actor.id == target.id {
            debug!(kind = %kind, user = %actor.id, "Self-action, no event constructed");
            return None;
        }

        if actor.display_name.trim().is_empty() {
            debug!(actor = %actor.id, "Actor profile unresolvable, no event constructed");
            return None;
        }

        Some(NotificationEvent {
            kind,
            recipient_id: target.id,
            recipient_email: target.email.clone(),
            actor: Actor::from(actor),
            subject_ref: action.subject_ref(),
            message: render_message(kind, &actor.display_name),
        })
    }
}

/// Fixed per-kind message template.
fn render_message(kind: NotificationKind, actor_name: &str) -> String {
    match kind {
        NotificationKind::Like => format!("{actor_name} liked your post"),
        NotificationKind::Comment => format!("{actor_name} commented on your post"),
        NotificationKind::Share => format!("{actor_name} shared your post"),
        NotificationKind::FriendRequest => format!("{actor_name} sent you a friend request"),
        NotificationKind::Message => format!("New message from {actor_name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildnet_core::types::UserId;

    fn profile(name: &str) -> UserProfile {
        UserProfile::new(UserId::new(), name)
    }

    #[test]
    fn test_like_event_shape() {
        let actor = profile("valkyrie").with_avatar("https://cdn.guildnet.gg/a.png");
        let target = profile("bastion").with_email("bastion@x.com");
        let post_id = PostId::new();

        let event = EventClassifier
            .classify(&Action::Like { post_id }, &actor, &target)
            .expect("event");

        assert_eq!(event.kind, NotificationKind::Like);
        assert_eq!(event.recipient_id, target.id);
        assert_eq!(event.recipient_email.as_deref(), Some("bastion@x.com"));
        assert_eq!(event.actor.id, actor.id);
        assert_eq!(event.subject_ref, Some(SubjectRef::Post(post_id)));
        assert_eq!(event.message, "valkyrie liked your post");
    }

    #[test]
    fn test_message_template() {
        let event = EventClassifier
            .classify(
                &Action::Message {
                    message_id: MessageId::new(),
                },
                &profile("valkyrie"),
                &profile("bastion"),
            )
            .expect("event");
        assert_eq!(event.message, "New message from valkyrie");
    }

    #[test]
    fn test_friend_request_has_no_subject() {
        let event = EventClassifier
            .classify(&Action::FriendRequest, &profile("valkyrie"), &profile("bastion"))
            .expect("event");
        assert_eq!(event.subject_ref, None);
    }

    #[test]
    fn test_self_action_produces_no_event() {
        let user = profile("valkyrie");
        let result = EventClassifier.classify(
            &Action::Like {
                post_id: PostId::new(),
            },
            &user,
            &user,
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_unresolvable_actor_produces_no_event() {
        let result =
            EventClassifier.classify(&Action::FriendRequest, &profile("  "), &profile("bastion"));
        assert!(result.is_none());
    }

    #[test]
    fn test_missing_target_email_still_classifies() {
        let event = EventClassifier
            .classify(&Action::FriendRequest, &profile("valkyrie"), &profile("bastion"))
            .expect("event");
        assert!(event.recipient_email.is_none());
    }
}
