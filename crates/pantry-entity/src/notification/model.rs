//! Notification entity model.
//!
//! This is the single canonical notification shape. Notifications are
//! created only by the generation engine; after that, only the recipient
//! user may transition them (read, dismissed). A generation run touching
//! an existing dedupe key must never modify the stored row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The two conditions the engine notifies about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// An item is approaching its expiry date.
    Expiry,
    /// An item's quantity has fallen to or below its threshold.
    LowStock,
}

impl NotificationKind {
    /// Return the kind as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expiry => "EXPIRY",
            Self::LowStock => "LOW_STOCK",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A notification delivered to a single user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The household whose inventory triggered this notification.
    pub household_id: Uuid,
    /// The recipient user. Read/dismiss state is personal to them.
    pub user_id: Uuid,
    /// The condition that fired.
    pub kind: NotificationKind,
    /// The inventory item that triggered the notification.
    pub item_id: Uuid,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// For expiry notifications, the lead-time window (days) that matched.
    pub window_days: Option<i32>,
    /// Deterministic key identifying the logical condition; unique.
    pub dedupe_key: String,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// When the recipient read it. Set once; never cleared.
    pub read_at: Option<DateTime<Utc>>,
    /// When the recipient dismissed it. Dismissed notifications drop out
    /// of the active list.
    pub dismissed_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Whether the notification is still in the recipient's active view.
    pub fn is_active(&self) -> bool {
        self.dismissed_at.is_none()
    }
}

/// A notification ready for insertion; storage assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// The household whose inventory triggered this notification.
    pub household_id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// The condition that fired.
    pub kind: NotificationKind,
    /// The triggering inventory item.
    pub item_id: Uuid,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Matched lead-time window for expiry notifications.
    pub window_days: Option<i32>,
    /// Deterministic dedupe key; unique in the store.
    pub dedupe_key: String,
}
