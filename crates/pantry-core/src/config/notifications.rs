//! Notification engine configuration.

use serde::{Deserialize, Serialize};

/// Settings for the background notification generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Whether the background scheduler is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression (seconds-resolution, six fields) for the recurring
    /// generation run. Default: hourly.
    #[serde(default = "default_schedule")]
    pub schedule: String,
    /// Whether to run one generation pass immediately at process startup.
    #[serde(default)]
    pub run_on_startup: bool,
    /// Expiry lead-time windows (days) used when a user has no stored
    /// preference.
    #[serde(default = "default_expiry_windows")]
    pub default_expiry_windows: Vec<i32>,
    /// Maximum number of active notifications returned by the list endpoint.
    #[serde(default = "default_max_listed")]
    pub max_active_listed: i64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            schedule: default_schedule(),
            run_on_startup: false,
            default_expiry_windows: default_expiry_windows(),
            max_active_listed: default_max_listed(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_schedule() -> String {
    "0 0 * * * *".to_string()
}

fn default_expiry_windows() -> Vec<i32> {
    vec![7, 3]
}

fn default_max_listed() -> i64 {
    200
}
