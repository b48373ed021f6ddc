//! Notification service facade.
//!
//! The single entry point other subsystems call after a user action. It
//! ties classification, suppression, fan-out, read state, and friend-request
//! consumption together over one store manager.


use guildnet_core::config::mail::MailConfig;
use guildnet_core::result::AppResult;
use guildnet_core::types::{
    MessageId, NotificationId, PageRequest, PageResponse, PostId, UserId,
};
use guildnet_entity::notification::NotificationRecord;
use guildnet_entity::user::UserProfile;
use guildnet_store::StoreManager;

use crate::classifier::{Action, EventClassifier};
use crate::dispatcher::{DispatchOutcome, FanoutDispatcher};
use crate::friendship::FriendRequestService;
use crate::inbox::InboxReadState;

/// Facade over the notification subsystem.
#[derive(Debug, Clone)]
pub struct NotificationService {
    classifier: EventClassifier,
    dispatcher: FanoutDispatcher,
    inbox: InboxReadState,
    friend_requests: FriendRequestService,
}

impl NotificationService {
    /// Wire the service over a store manager.
    pub fn new(stores: &StoreManager, mail_config: &MailConfig) -> Self {
        Self {
            classifier: EventClassifier,
            dispatcher: FanoutDispatcher::new(stores.notifications(), stores.mail(), mail_config),
            inbox: InboxReadState::new(stores.notifications()),
            friend_requests: FriendRequestService::new(
                stores.notifications(),
                stores.friendships(),
            ),
        }
    }

    /// Classify and dispatch one action.
    ///
    /// Self-actions and unresolvable actors classify to nothing and come
    /// back as [`DispatchOutcome::Suppressed`]; the triggering action
    /// itself is never failed on their account.
    pub async fn publish(
        &self,
        action: Action,
        actor: &UserProfile,
        target: &UserProfile,
    ) -> AppResult<DispatchOutcome> {
        match self.classifier.classify(&action, actor, target) {
            Some(event) => self.dispatcher.dispatch(&event).await,
            None => Ok(DispatchOutcome::Suppressed),
        }
    }

    /// Notify the post owner of a like.
    pub async fn notify_like(
        &self,
        actor: &UserProfile,
        target: &UserProfile,
        post_id: PostId,
    ) -> AppResult<DispatchOutcome> {
        self.publish(Action::Like { post_id }, actor, target).await
    }

    /// Notify the post owner of a comment.
    pub async fn notify_comment(
        &self,
        actor: &UserProfile,
        target: &UserProfile,
        post_id: PostId,
    ) -> AppResult<DispatchOutcome> {
        self.publish(Action::Comment { post_id }, actor, target).await
    }

    /// Notify the post owner of a share.
    pub async fn notify_share(
        &self,
        actor: &UserProfile,
        target: &UserProfile,
        post_id: PostId,
    ) -> AppResult<DispatchOutcome> {
        self.publish(Action::Share { post_id }, actor, target).await
    }

    /// Notify the target of a friend request.
    pub async fn notify_friend_request(
        &self,
        actor: &UserProfile,
        target: &UserProfile,
    ) -> AppResult<DispatchOutcome> {
        self.publish(Action::FriendRequest, actor, target).await
    }

    /// Notify the recipient of a direct message.
    pub async fn notify_message(
        &self,
        actor: &UserProfile,
        target: &UserProfile,
        message_id: MessageId,
    ) -> AppResult<DispatchOutcome> {
        self.publish(Action::Message { message_id }, actor, target).await
    }

    /// The recipient's full inbox, newest first.
    pub async fn list_inbox(&self, recipient: UserId) -> AppResult<Vec<NotificationRecord>> {
        self.inbox.list(recipient).await
    }

    /// A page of the recipient's inbox, newest first.
    pub async fn list_inbox_page(
        &self,
        recipient: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<NotificationRecord>> {
        self.inbox.list_page(recipient, page).await
    }

    /// Number of unread notifications.
    pub async fn unread_count(&self, recipient: UserId) -> AppResult<u64> {
        self.inbox.unread_count(recipient).await
    }

    /// Mark the listed notifications read.
    pub async fn mark_read(&self, recipient: UserId, ids: &[NotificationId]) -> AppResult<u64> {
        self.inbox.mark_read(recipient, ids).await
    }

    /// Mark the whole inbox read.
    pub async fn mark_all_read(&self, recipient: UserId) -> AppResult<u64> {
        self.inbox.mark_all_read(recipient).await
    }

    /// Accept the actor's pending friend request.
    pub async fn accept_friend_request(&self, recipient: UserId, actor: UserId) -> AppResult<()> {
        self.friend_requests.accept(recipient, actor).await
    }

    /// Reject the actor's pending friend request.
    pub async fn reject_friend_request(&self, recipient: UserId, actor: UserId) -> AppResult<()> {
        self.friend_requests.reject(recipient, actor).await
    }
}
