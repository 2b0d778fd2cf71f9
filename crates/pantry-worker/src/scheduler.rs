//! Cron scheduler for recurring notification generation runs.
//!
//! The scheduler is an explicit lifecycle object owning the timer
//! handle: `start` is idempotent (a second call is a no-op, not an
//! error) and `shutdown` stops the timer. Scheduled runs call the same
//! engine routine as the authenticated generate endpoint; overlapping
//! executions are safe because the engine's conditional insert is the
//! only correctness mechanism.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::{debug, error, info, warn};

use pantry_core::config::notifications::NotificationsConfig;
use pantry_core::error::AppError;
use pantry_service::notification::engine::GenerationEngine;

/// Owns the recurring generation timer.
pub struct NotificationScheduler {
    /// The generation engine shared with the HTTP layer.
    engine: Arc<GenerationEngine>,
    /// Notification settings (cron expression, startup behavior).
    config: NotificationsConfig,
    /// The running scheduler, once started.
    inner: Mutex<Option<JobScheduler>>,
}

impl std::fmt::Debug for NotificationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationScheduler")
            .field("schedule", &self.config.schedule)
            .finish()
    }
}

impl NotificationScheduler {
    /// Create a new scheduler around the given engine.
    pub fn new(engine: Arc<GenerationEngine>, config: NotificationsConfig) -> Self {
        Self {
            engine,
            config,
            inner: Mutex::new(None),
        }
    }

    /// Start the recurring timer. Starting an already-started scheduler
    /// is a no-op.
    pub async fn start(&self) -> Result<(), AppError> {
        let mut guard = self.inner.lock().await;
        if guard.is_some() {
            debug!("Notification scheduler already started");
            return Ok(());
        }

        // Degrades to "duplicates possible" on failure; keep going.
        if let Err(e) = self.engine.ensure_sink_schema().await {
            warn!(
                error = %e,
                "Failed to ensure dedupe index; continuing with degraded duplicate prevention"
            );
        }

        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        let engine = Arc::clone(&self.engine);
        let job = CronJob::new_async(self.config.schedule.as_str(), move |_uuid, _lock| {
            let engine = Arc::clone(&engine);
            Box::pin(async move {
                match engine.run_scheduled().await {
                    Ok(summary) => debug!(
                        households = summary.households,
                        created = summary.created,
                        failed = summary.failed,
                        "Scheduled generation run finished"
                    ),
                    Err(e) => error!(error = %e, "Scheduled generation run failed"),
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create generation schedule: {e}")))?;

        scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add generation schedule: {e}")))?;

        scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        if self.config.run_on_startup {
            let engine = Arc::clone(&self.engine);
            tokio::spawn(async move {
                if let Err(e) = engine.run_scheduled().await {
                    error!(error = %e, "Startup generation run failed");
                }
            });
        }

        info!(schedule = %self.config.schedule, "Notification scheduler started");
        *guard = Some(scheduler);
        Ok(())
    }

    /// Stop the timer. Shutting down a never-started scheduler is a
    /// no-op.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        let mut guard = self.inner.lock().await;
        if let Some(mut scheduler) = guard.take() {
            scheduler
                .shutdown()
                .await
                .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;
            info!("Notification scheduler shut down");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use uuid::Uuid;

    use pantry_core::result::AppResult;
    use pantry_entity::inventory::InventoryItem;
    use pantry_entity::notification::model::NewNotification;
    use pantry_entity::notification::preference::ExpiryWindows;
    use pantry_service::notification::stores::{
        HouseholdDirectory, InventorySource, NotificationSink, PreferenceSource,
    };

    struct Empty;

    #[async_trait]
    impl InventorySource for Empty {
        async fn items_for_household(&self, _household_id: Uuid) -> AppResult<Vec<InventoryItem>> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl HouseholdDirectory for Empty {
        async fn all_household_ids(&self) -> AppResult<Vec<Uuid>> {
            Ok(Vec::new())
        }

        async fn members_of(&self, _household_id: Uuid) -> AppResult<Vec<Uuid>> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl PreferenceSource for Empty {
        async fn windows_for(&self, _user_id: Uuid) -> AppResult<Option<ExpiryWindows>> {
            Ok(None)
        }
    }

    #[async_trait]
    impl NotificationSink for Empty {
        async fn insert_if_absent(&self, _notification: &NewNotification) -> AppResult<bool> {
            Ok(false)
        }
    }

    fn idle_engine() -> Arc<GenerationEngine> {
        Arc::new(GenerationEngine::new(
            Arc::new(Empty),
            Arc::new(Empty),
            Arc::new(Empty),
            Arc::new(Empty),
            ExpiryWindows::default(),
        ))
    }

    #[tokio::test]
    async fn test_start_is_idempotent() {
        let scheduler = NotificationScheduler::new(idle_engine(), NotificationsConfig::default());

        scheduler.start().await.unwrap();
        scheduler.start().await.unwrap();
        scheduler.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_without_start_is_noop() {
        let scheduler = NotificationScheduler::new(idle_engine(), NotificationsConfig::default());
        scheduler.shutdown().await.unwrap();
    }
}
