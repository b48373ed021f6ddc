//! Suppression policy.
//!
//! Applied between classification and fan-out. The rules are evaluated in
//! order; the first matching rule suppresses the event.

use tracing::debug;

use guildnet_entity::notification::{NotificationEvent, NotificationKind};

/// Decides whether a classified event proceeds to fan-out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuppressionPolicy;

impl SuppressionPolicy {
    /// Whether the event should be delivered.
    ///
    /// `has_pending_friend_request` is the store's answer for the
    /// `(recipient, actor)` pair and is only consulted for
    /// FRIEND_REQUEST events. It is advisory: the insert path enforces
    /// the same rule under a write-time key, so a stale `false` here
    /// cannot produce a duplicate.
    pub fn should_notify(
        &self,
        event: &NotificationEvent,
        has_pending_friend_request: bool,
    ) -> bool {
        if event.kind != NotificationKind::FriendRequest && event.actor.id == event.recipient_id {
            debug!(kind = %event.kind, user = %event.actor.id, "Suppressed self-action");
            return false;
        }

        if event.kind == NotificationKind::FriendRequest && has_pending_friend_request {
            debug!(
                recipient = %event.recipient_id,
                actor = %event.actor.id,
                "Suppressed duplicate friend request"
            );
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildnet_core::types::{PostId, UserId};
    use guildnet_entity::notification::{Actor, SubjectRef};

    fn event(kind: NotificationKind, actor_id: UserId, recipient_id: UserId) -> NotificationEvent {
        NotificationEvent {
            kind,
            recipient_id,
            recipient_email: None,
            actor: Actor {
                id: actor_id,
                display_name: "valkyrie".into(),
                avatar_url: None,
            },
            subject_ref: Some(SubjectRef::Post(PostId::new())),
            message: "valkyrie liked your post".into(),
        }
    }

    #[test]
    fn test_distinct_users_pass() {
        let e = event(NotificationKind::Like, UserId::new(), UserId::new());
        assert!(SuppressionPolicy.should_notify(&e, false));
    }

    #[test]
    fn test_self_action_suppressed() {
        let user = UserId::new();
        let e = event(NotificationKind::Comment, user, user);
        assert!(!SuppressionPolicy.should_notify(&e, false));
    }

    #[test]
    fn test_pending_friend_request_suppressed() {
        let e = event(NotificationKind::FriendRequest, UserId::new(), UserId::new());
        assert!(SuppressionPolicy.should_notify(&e, false));
        assert!(!SuppressionPolicy.should_notify(&e, true));
    }

    #[test]
    fn test_pending_flag_ignored_for_other_kinds() {
        let e = event(NotificationKind::Message, UserId::new(), UserId::new());
        assert!(SuppressionPolicy.should_notify(&e, true));
    }
}
