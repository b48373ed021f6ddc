//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Settings for the email channel.
///
/// The service only *enqueues* mail; delivery is performed by an external
/// relay that consumes the queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Whether the email leg of the fan-out is enabled at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Sender address recorded on queue entries.
    #[serde(default = "default_from")]
    pub from_address: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            from_address: default_from(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_from() -> String {
    "GuildNet <noreply@guildnet.gg>".to_string()
}
