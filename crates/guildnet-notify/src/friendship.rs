//! Friend-request consumption.
//!
//! Friend-request notifications are actionable: accepting or rejecting one
//! consumes the inbox record, which also frees the write-time dedup key so
//! the same actor can send a fresh request later.

use std::sync::Arc;

use tracing::info;

use guildnet_core::result::AppResult;
use guildnet_core::types::UserId;
use guildnet_store::traits::{FriendshipStore, NotificationStore};

/// Accept/reject operations for friend-request notifications.
#[derive(Debug, Clone)]
pub struct FriendRequestService {
    notifications: Arc<dyn NotificationStore>,
    friendships: Arc<dyn FriendshipStore>,
}

impl FriendRequestService {
    /// Create the service over the given store handles.
    pub fn new(
        notifications: Arc<dyn NotificationStore>,
        friendships: Arc<dyn FriendshipStore>,
    ) -> Self {
        Self {
            notifications,
            friendships,
        }
    }

    /// Accept the actor's friend request: link the users both ways, then
    /// consume the pending notification. Idempotent on re-accept.
    pub async fn accept(&self, recipient: UserId, actor: UserId) -> AppResult<()> {
        self.friendships.link(recipient, actor).await?;
        let removed = self
            .notifications
            .delete_friend_request(recipient, actor)
            .await?;
        info!(recipient = %recipient, actor = %actor, removed, "Friend request accepted");
        Ok(())
    }

    /// Reject the actor's friend request: consume the pending notification
    /// without touching the friend graph.
    pub async fn reject(&self, recipient: UserId, actor: UserId) -> AppResult<()> {
        let removed = self
            .notifications
            .delete_friend_request(recipient, actor)
            .await?;
        info!(recipient = %recipient, actor = %actor, removed, "Friend request rejected");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guildnet_entity::notification::{Actor, NewNotification, NotificationKind};
    use guildnet_store::memory::{MemoryFriendshipStore, MemoryNotificationStore};

    fn friend_request(recipient: UserId, actor: UserId) -> NewNotification {
        NewNotification {
            recipient_id: recipient,
            kind: NotificationKind::FriendRequest,
            actor: Actor {
                id: actor,
                display_name: "valkyrie".into(),
                avatar_url: None,
            },
            subject_ref: None,
            message: "valkyrie sent you a friend request".into(),
        }
    }

    fn service() -> (
        FriendRequestService,
        Arc<MemoryNotificationStore>,
        Arc<MemoryFriendshipStore>,
    ) {
        let notifications = Arc::new(MemoryNotificationStore::new(16));
        let friendships = Arc::new(MemoryFriendshipStore::new());
        let service = FriendRequestService::new(notifications.clone(), friendships.clone());
        (service, notifications, friendships)
    }

    #[tokio::test]
    async fn test_accept_links_and_consumes() {
        let (service, notifications, friendships) = service();
        let (recipient, actor) = (UserId::new(), UserId::new());

        notifications
            .insert(&friend_request(recipient, actor))
            .await
            .expect("insert")
            .expect("record");

        service.accept(recipient, actor).await.expect("accept");

        assert!(friendships.are_friends(recipient, actor).await.expect("query"));
        assert!(friendships.are_friends(actor, recipient).await.expect("query"));
        assert!(!notifications
            .has_pending_friend_request(recipient, actor)
            .await
            .expect("query"));
    }

    #[tokio::test]
    async fn test_reject_consumes_without_linking() {
        let (service, notifications, friendships) = service();
        let (recipient, actor) = (UserId::new(), UserId::new());

        notifications
            .insert(&friend_request(recipient, actor))
            .await
            .expect("insert")
            .expect("record");

        service.reject(recipient, actor).await.expect("reject");

        assert!(!friendships.are_friends(recipient, actor).await.expect("query"));
        assert!(!notifications
            .has_pending_friend_request(recipient, actor)
            .await
            .expect("query"));
    }

    #[tokio::test]
    async fn test_consumption_frees_dedup_key() {
        let (service, notifications, _) = service();
        let (recipient, actor) = (UserId::new(), UserId::new());

        notifications
            .insert(&friend_request(recipient, actor))
            .await
            .expect("insert")
            .expect("record");
        service.reject(recipient, actor).await.expect("reject");

        // A fresh request from the same actor now inserts again.
        let reinserted = notifications
            .insert(&friend_request(recipient, actor))
            .await
            .expect("insert");
        assert!(reinserted.is_some());
    }

    #[tokio::test]
    async fn test_accept_without_pending_request_is_noop() {
        let (service, _, friendships) = service();
        let (recipient, actor) = (UserId::new(), UserId::new());

        service.accept(recipient, actor).await.expect("accept");
        assert!(friendships.are_friends(recipient, actor).await.expect("query"));

        // Re-accept stays idempotent.
        service.accept(recipient, actor).await.expect("accept");
    }
}
