//! Fan-out dispatcher.
//!
//! Takes a classified event past the suppression policy and delivers it to
//! both legs: the in-app inbox record (authoritative) and the mail queue
//! entry (best effort).

use std::sync::Arc;

use tracing::{info, warn};

use guildnet_core::config::mail::MailConfig;
use guildnet_core::result::AppResult;
use guildnet_core::types::NotificationId;
use guildnet_entity::mail::OutboundMail;
use guildnet_entity::notification::{NewNotification, NotificationEvent, NotificationKind};
use guildnet_store::traits::{MailQueue, NotificationStore};

use crate::suppression::SuppressionPolicy;

/// What happened to a dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The suppression policy (or the store's write-time friend-request
    /// key) dropped the event. Nothing was written.
    Suppressed,
    /// An inbox record was created.
    Delivered {
        /// The new record's id.
        record_id: NotificationId,
        /// Whether a mail queue entry was also enqueued.
        mail_enqueued: bool,
    },
}

/// Fans classified events out to the inbox and the mail queue.
#[derive(Debug, Clone)]
pub struct FanoutDispatcher {
    store: Arc<dyn NotificationStore>,
    mail: Arc<dyn MailQueue>,
    policy: SuppressionPolicy,
    mail_enabled: bool,
    mail_from: String,
}

impl FanoutDispatcher {
    /// Create a dispatcher over the given store handles.
    pub fn new(
        store: Arc<dyn NotificationStore>,
        mail: Arc<dyn MailQueue>,
        mail_config: &MailConfig,
    ) -> Self {
        Self {
            store,
            mail,
            policy: SuppressionPolicy,
            mail_enabled: mail_config.enabled,
            mail_from: mail_config.from_address.clone(),
        }
    }

    /// Dispatch one event.
    ///
    /// The in-app record is the authoritative leg: its failure propagates.
    /// The mail leg is best effort — enqueue failures are logged and leave
    /// the record's `email_dispatched` flag false, but never fail the
    /// dispatch. Errors after the record exists are not propagated either,
    /// so a retrying caller cannot produce duplicate records.
    pub async fn dispatch(&self, event: &NotificationEvent) -> AppResult<DispatchOutcome> {
        let has_pending = if event.kind == NotificationKind::FriendRequest {
            self.store
                .has_pending_friend_request(event.recipient_id, event.actor.id)
                .await?
        } else {
            false
        };

        if !self.policy.should_notify(event, has_pending) {
            return Ok(DispatchOutcome::Suppressed);
        }

        let Some(record) = self.store.insert(&NewNotification::from_event(event)).await? else {
            // Lost the race against a concurrent friend request; the
            // write-time key kept the inbox clean.
            return Ok(DispatchOutcome::Suppressed);
        };

        info!(
            id = %record.id,
            kind = %record.kind,
            recipient = %record.recipient_id,
            "Notification delivered"
        );

        let mail_enqueued = self.dispatch_mail(event, record.id).await;

        Ok(DispatchOutcome::Delivered {
            record_id: record.id,
            mail_enqueued,
        })
    }

    /// The mail leg. Returns whether an entry was enqueued.
    async fn dispatch_mail(&self, event: &NotificationEvent, record_id: NotificationId) -> bool {
        if !self.mail_enabled {
            return false;
        }

        let Some(mail) = OutboundMail::for_event(event, &self.mail_from) else {
            info!(
                recipient = %event.recipient_id,
                "No email address on record, skipping mail leg"
            );
            return false;
        };

        if let Err(err) = self.mail.enqueue(&mail).await {
            warn!(
                recipient = %event.recipient_id,
                error = %err,
                "Mail enqueue failed, in-app record stands"
            );
            return false;
        }

        if let Err(err) = self
            .store
            .mark_email_dispatched(event.recipient_id, record_id)
            .await
        {
            warn!(id = %record_id, error = %err, "Failed to flag email dispatch");
        }

        true
    }
}
