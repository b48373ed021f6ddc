//! Notification fan-out and retention configuration.

use serde::{Deserialize, Serialize};

/// Settings for the notification subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Age in days after which *read* notifications are swept.
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
    /// Cron expression for the retention sweep (6-field, seconds first).
    #[serde(default = "default_sweep_schedule")]
    pub sweep_schedule: String,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            sweep_schedule: default_sweep_schedule(),
        }
    }
}

fn default_retention_days() -> i64 {
    30
}

fn default_sweep_schedule() -> String {
    // Daily at 2 AM.
    "0 0 2 * * *".to_string()
}
