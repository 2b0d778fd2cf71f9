//! Notification lifecycle and preference management.
//!
//! Read/mark-read/dismiss operations are scoped to the calling user; a
//! notification that does not exist and one owned by someone else are
//! indistinguishable to the caller (both report not-found).

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use pantry_core::config::notifications::NotificationsConfig;
use pantry_core::error::AppError;
use pantry_core::result::AppResult;
use pantry_database::repositories::notification::NotificationRepository;
use pantry_database::repositories::preference::PreferenceRepository;
use pantry_entity::notification::model::Notification;
use pantry_entity::notification::preference::ExpiryWindows;

use crate::context::RequestContext;

use super::engine::{GenerationEngine, GenerationRequest, GenerationScope, RecipientMode};

/// Manages user notifications, preferences, and manual generation runs.
pub struct NotificationService {
    /// Notification repository.
    notifications: Arc<NotificationRepository>,
    /// Preference repository.
    preferences: Arc<PreferenceRepository>,
    /// The generation engine shared with the scheduler.
    engine: Arc<GenerationEngine>,
    /// Notification settings.
    config: NotificationsConfig,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        notifications: Arc<NotificationRepository>,
        preferences: Arc<PreferenceRepository>,
        engine: Arc<GenerationEngine>,
        config: NotificationsConfig,
    ) -> Self {
        Self {
            notifications,
            preferences,
            engine,
            config,
        }
    }

    /// Lists the caller's active notifications, newest first, bounded.
    pub async fn list_active(&self, ctx: &RequestContext) -> AppResult<Vec<Notification>> {
        self.notifications
            .list_active(ctx.user_id, self.config.max_active_listed)
            .await
    }

    /// Gets the caller's lead-time windows (stored, else default).
    pub async fn get_preferences(&self, ctx: &RequestContext) -> AppResult<ExpiryWindows> {
        let stored = self.preferences.get(ctx.user_id).await?;
        Ok(stored
            .and_then(|p| ExpiryWindows::from_days(&p.expiry_windows))
            .unwrap_or_else(|| self.default_windows()))
    }

    /// Replaces the caller's lead-time windows.
    ///
    /// Input is normalized (dedupe, drop invalid, sort descending); an
    /// input that normalizes to nothing is rejected.
    pub async fn update_preferences(
        &self,
        ctx: &RequestContext,
        raw: &[serde_json::Value],
    ) -> AppResult<ExpiryWindows> {
        let windows = ExpiryWindows::normalize(raw).ok_or_else(|| {
            AppError::validation("expiryWindows must contain valid day numbers (1..90)")
        })?;

        let stored = self
            .preferences
            .upsert(ctx.user_id, windows.days())
            .await?;

        Ok(ExpiryWindows::from_days(&stored.expiry_windows).unwrap_or(windows))
    }

    /// Marks a notification as read. Only the recipient can; `read_at`
    /// is never moved once set.
    pub async fn mark_read(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Notification> {
        self.notifications
            .mark_read(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    /// Dismisses a notification, removing it from the active list.
    pub async fn dismiss(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Notification> {
        self.notifications
            .dismiss(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    /// Triggers a generation run scoped to the caller's household.
    ///
    /// Windows resolve as: request override (validated), else the
    /// caller's stored preference, else the system default. Returns the
    /// number of newly created notifications and the windows used.
    pub async fn generate(
        &self,
        ctx: &RequestContext,
        override_windows: Option<&[serde_json::Value]>,
    ) -> AppResult<(usize, ExpiryWindows)> {
        let household_id = ctx.require_household()?;

        let windows = match override_windows {
            Some(raw) if !raw.is_empty() => ExpiryWindows::normalize(raw)
                .ok_or_else(|| AppError::validation("No valid expiryWindows provided"))?,
            _ => self.get_preferences(ctx).await?,
        };

        let summary = self
            .engine
            .run(GenerationRequest {
                scope: GenerationScope::Household(household_id),
                recipients: RecipientMode::Single {
                    user_id: ctx.user_id,
                    windows: Some(windows.clone()),
                },
            })
            .await?;

        info!(
            %household_id,
            created = summary.created,
            scanned = summary.scanned,
            "Manual generation run completed"
        );

        Ok((summary.created, windows))
    }

    /// The configured fallback windows.
    fn default_windows(&self) -> ExpiryWindows {
        ExpiryWindows::from_days(&self.config.default_expiry_windows).unwrap_or_default()
    }
}
