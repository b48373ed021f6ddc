//! Minimal user identity as required by the notification subsystem.
//!
//! The user directory itself lives in the main application; callers pass
//! resolved profiles into the classifier. Only identity and contact fields
//! are needed here.

use serde::{Deserialize, Serialize};

use guildnet_core::types::UserId;

/// Actor/target identity for event classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The user's ID.
    pub id: UserId,
    /// Display name shown in rendered messages.
    pub display_name: String,
    /// Avatar image URL, if set.
    pub avatar_url: Option<String>,
    /// Email address for the mail channel, if known.
    pub email: Option<String>,
}

impl UserProfile {
    /// Create a profile with just the required identity fields.
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            avatar_url: None,
            email: None,
        }
    }

    /// Attach an email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Attach an avatar URL.
    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }
}
