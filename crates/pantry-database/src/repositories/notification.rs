//! Notification repository implementation.
//!
//! The dedupe-key uniqueness constraint enforced here is the *only*
//! concurrency-control primitive the generation engine relies on. Every
//! write path is a single atomic statement; there is no read-then-write
//! anywhere in this file.

use sqlx::PgPool;
use uuid::Uuid;

use pantry_core::error::{AppError, ErrorKind};
use pantry_core::result::AppResult;
use pantry_entity::notification::model::{NewNotification, Notification};

/// Repository for notification persistence and lifecycle transitions.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a notification unless one with the same dedupe key already
    /// exists. Returns `true` when a row was created.
    ///
    /// An existing row is left completely untouched, so read/dismiss
    /// state survives repeated generation runs against the same
    /// condition.
    pub async fn insert_if_absent(&self, notification: &NewNotification) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO notifications \
             (household_id, user_id, kind, item_id, title, message, window_days, dedupe_key) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (dedupe_key) DO NOTHING",
        )
        .bind(notification.household_id)
        .bind(notification.user_id)
        .bind(notification.kind)
        .bind(notification.item_id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.window_days)
        .bind(&notification.dedupe_key)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert notification", e)
        })?;

        Ok(result.rows_affected() == 1)
    }

    /// List a user's active (non-dismissed) notifications, newest first.
    pub async fn list_active(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 AND dismissed_at IS NULL \
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))
    }

    /// Mark a notification as read, scoped to its owner.
    ///
    /// `read_at` is set only if currently unset, so a second read (or a
    /// generation run racing this call) never moves the timestamp.
    /// Returns `None` when the notification does not exist or belongs to
    /// another user.
    pub async fn mark_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET read_at = COALESCE(read_at, NOW()) \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))
    }

    /// Dismiss a notification, scoped to its owner. Dismissed rows drop
    /// out of the active list. Returns `None` when the notification does
    /// not exist or belongs to another user.
    pub async fn dismiss(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET dismissed_at = COALESCE(dismissed_at, NOW()) \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to dismiss notification", e))
    }

    /// Ensure the unique dedupe-key index exists.
    ///
    /// Called at startup before the first generation run. A failure here
    /// must not crash the process; the caller logs it and continues with
    /// degraded duplicate prevention.
    pub async fn ensure_dedupe_index(&self) -> AppResult<()> {
        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_notifications_dedupe_key \
             ON notifications (dedupe_key)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to ensure dedupe index", e)
        })?;
        Ok(())
    }
}
