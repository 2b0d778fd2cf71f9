//! Notification generation orchestrator.
//!
//! Drives one generation run: resolve the households in scope, resolve
//! recipients and their lead-time windows, evaluate the rules, and
//! persist every candidate through an at-most-once conditional insert.
//!
//! Both triggers — the recurring scheduler and the authenticated
//! generate endpoint — call [`GenerationEngine::run`]; they differ only
//! in scope and recipient mode. Concurrent runs against the same
//! household are safe by construction: the dedupe-key conditional insert
//! is commutative and idempotent, so no locking exists between runs.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use pantry_core::result::AppResult;
use pantry_entity::notification::preference::ExpiryWindows;

use super::evaluator::evaluate;
use super::stores::{HouseholdDirectory, InventorySource, NotificationSink, PreferenceSource};

/// Which households a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationScope {
    /// Every household in the system (scheduler-triggered).
    AllHouseholds,
    /// One household (request-triggered).
    Household(Uuid),
}

/// Who receives the generated notifications.
#[derive(Debug, Clone)]
pub enum RecipientMode {
    /// Every member of each household in scope, each using their own
    /// stored windows (falling back to the system default).
    AllMembers,
    /// The single requesting user. `windows`, when set, overrides the
    /// user's stored preference.
    Single {
        /// The requesting user.
        user_id: Uuid,
        /// Override windows, already normalized.
        windows: Option<ExpiryWindows>,
    },
}

/// Parameters for one generation run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Which households to process.
    pub scope: GenerationScope,
    /// Who receives the results.
    pub recipients: RecipientMode,
}

/// Outcome of one generation run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RunSummary {
    /// Households processed (including failed ones).
    pub households: usize,
    /// Inventory items scanned across all processed households.
    pub scanned: usize,
    /// Notifications newly created.
    pub created: usize,
    /// Households that failed and were skipped.
    pub failed: usize,
}

/// The notification generation orchestrator.
pub struct GenerationEngine {
    /// Read-only inventory access.
    inventory: Arc<dyn InventorySource>,
    /// Household and membership enumeration.
    directory: Arc<dyn HouseholdDirectory>,
    /// Per-user lead-time windows.
    preferences: Arc<dyn PreferenceSource>,
    /// At-most-once notification persistence.
    sink: Arc<dyn NotificationSink>,
    /// Windows used when a recipient has no stored preference.
    default_windows: ExpiryWindows,
}

impl std::fmt::Debug for GenerationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationEngine")
            .field("default_windows", &self.default_windows)
            .finish()
    }
}

impl GenerationEngine {
    /// Create a new engine over the given stores.
    pub fn new(
        inventory: Arc<dyn InventorySource>,
        directory: Arc<dyn HouseholdDirectory>,
        preferences: Arc<dyn PreferenceSource>,
        sink: Arc<dyn NotificationSink>,
        default_windows: ExpiryWindows,
    ) -> Self {
        Self {
            inventory,
            directory,
            preferences,
            sink,
            default_windows,
        }
    }

    /// Ensure the sink's dedupe constraint exists.
    ///
    /// See [`NotificationSink::ensure_schema`]: failure means duplicates
    /// become possible and must be surfaced via logging, not a crash.
    pub async fn ensure_sink_schema(&self) -> AppResult<()> {
        self.sink.ensure_schema().await
    }

    /// Scheduler entry point: all households, every member.
    pub async fn run_scheduled(&self) -> AppResult<RunSummary> {
        self.run(GenerationRequest {
            scope: GenerationScope::AllHouseholds,
            recipients: RecipientMode::AllMembers,
        })
        .await
    }

    /// Execute one generation run.
    ///
    /// A failure while processing one household is logged and counted;
    /// the remaining households are still processed.
    pub async fn run(&self, request: GenerationRequest) -> AppResult<RunSummary> {
        let household_ids = match request.scope {
            GenerationScope::Household(id) => vec![id],
            GenerationScope::AllHouseholds => self.directory.all_household_ids().await?,
        };

        let today = Utc::now().date_naive();
        let mut summary = RunSummary::default();

        for household_id in household_ids {
            summary.households += 1;
            match self
                .run_household(household_id, &request.recipients, today)
                .await
            {
                Ok((scanned, created)) => {
                    summary.scanned += scanned;
                    summary.created += created;
                }
                Err(e) => {
                    warn!(%household_id, error = %e, "Generation failed for household");
                    summary.failed += 1;
                }
            }
        }

        info!(
            households = summary.households,
            scanned = summary.scanned,
            created = summary.created,
            failed = summary.failed,
            "Generation run finished"
        );
        Ok(summary)
    }

    /// Process one household: evaluate per recipient and persist.
    async fn run_household(
        &self,
        household_id: Uuid,
        recipients: &RecipientMode,
        today: chrono::NaiveDate,
    ) -> AppResult<(usize, usize)> {
        let items = self.inventory.items_for_household(household_id).await?;

        let resolved: Vec<(Uuid, ExpiryWindows)> = match recipients {
            RecipientMode::AllMembers => {
                let mut out = Vec::new();
                for user_id in self.directory.members_of(household_id).await? {
                    let windows = self
                        .preferences
                        .windows_for(user_id)
                        .await?
                        .unwrap_or_else(|| self.default_windows.clone());
                    out.push((user_id, windows));
                }
                out
            }
            RecipientMode::Single { user_id, windows } => {
                let windows = match windows {
                    Some(w) => w.clone(),
                    None => self
                        .preferences
                        .windows_for(*user_id)
                        .await?
                        .unwrap_or_else(|| self.default_windows.clone()),
                };
                vec![(*user_id, windows)]
            }
        };

        let mut created = 0;
        for (user_id, windows) in &resolved {
            for candidate in evaluate(&items, today, windows) {
                let notification = candidate.for_recipient(household_id, *user_id);
                if self.sink.insert_if_absent(&notification).await? {
                    created += 1;
                }
            }
        }

        Ok((items.len(), created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use pantry_core::error::AppError;
    use pantry_entity::inventory::InventoryItem;
    use pantry_entity::notification::model::NewNotification;

    struct FakeInventory {
        items: HashMap<Uuid, Vec<InventoryItem>>,
        fail_for: HashSet<Uuid>,
    }

    #[async_trait]
    impl InventorySource for FakeInventory {
        async fn items_for_household(&self, household_id: Uuid) -> AppResult<Vec<InventoryItem>> {
            if self.fail_for.contains(&household_id) {
                return Err(AppError::database("store unavailable"));
            }
            Ok(self.items.get(&household_id).cloned().unwrap_or_default())
        }
    }

    struct FakeDirectory {
        households: Vec<Uuid>,
        members: HashMap<Uuid, Vec<Uuid>>,
    }

    #[async_trait]
    impl HouseholdDirectory for FakeDirectory {
        async fn all_household_ids(&self) -> AppResult<Vec<Uuid>> {
            Ok(self.households.clone())
        }

        async fn members_of(&self, household_id: Uuid) -> AppResult<Vec<Uuid>> {
            Ok(self.members.get(&household_id).cloned().unwrap_or_default())
        }
    }

    struct FakePreferences {
        windows: HashMap<Uuid, ExpiryWindows>,
    }

    #[async_trait]
    impl PreferenceSource for FakePreferences {
        async fn windows_for(&self, user_id: Uuid) -> AppResult<Option<ExpiryWindows>> {
            Ok(self.windows.get(&user_id).cloned())
        }
    }

    struct StoredRow {
        notification: NewNotification,
        read: bool,
    }

    struct FakeSink {
        rows: Mutex<HashMap<String, StoredRow>>,
    }

    impl FakeSink {
        fn new() -> Self {
            Self {
                rows: Mutex::new(HashMap::new()),
            }
        }

        fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        fn mark_read(&self, dedupe_key: &str) {
            self.rows
                .lock()
                .unwrap()
                .get_mut(dedupe_key)
                .expect("row exists")
                .read = true;
        }

        fn is_read(&self, dedupe_key: &str) -> bool {
            self.rows.lock().unwrap()[dedupe_key].read
        }

        fn keys(&self) -> Vec<String> {
            self.rows.lock().unwrap().keys().cloned().collect()
        }

        fn recipients(&self) -> HashSet<Uuid> {
            self.rows
                .lock()
                .unwrap()
                .values()
                .map(|r| r.notification.user_id)
                .collect()
        }
    }

    #[async_trait]
    impl NotificationSink for FakeSink {
        async fn insert_if_absent(&self, notification: &NewNotification) -> AppResult<bool> {
            let mut rows = self.rows.lock().unwrap();
            if rows.contains_key(&notification.dedupe_key) {
                return Ok(false);
            }
            rows.insert(
                notification.dedupe_key.clone(),
                StoredRow {
                    notification: notification.clone(),
                    read: false,
                },
            );
            Ok(true)
        }
    }

    fn item_expiring_in(household_id: Uuid, days: i64) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            household_id,
            name: "Milk".to_string(),
            category: "Dairy".to_string(),
            quantity: 10.0,
            unit: "l".to_string(),
            threshold: 0.0,
            expiry_date: Some(Utc::now().date_naive() + Duration::days(days)),
            location: "fridge".to_string(),
            last_updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn low_stock_item(household_id: Uuid) -> InventoryItem {
        InventoryItem {
            quantity: 1.0,
            threshold: 4.0,
            expiry_date: None,
            ..item_expiring_in(household_id, 0)
        }
    }

    struct Setup {
        engine: GenerationEngine,
        sink: Arc<FakeSink>,
    }

    fn engine_with(
        items: HashMap<Uuid, Vec<InventoryItem>>,
        households: Vec<Uuid>,
        members: HashMap<Uuid, Vec<Uuid>>,
        windows: HashMap<Uuid, ExpiryWindows>,
        fail_for: HashSet<Uuid>,
    ) -> Setup {
        let sink = Arc::new(FakeSink::new());
        let engine = GenerationEngine::new(
            Arc::new(FakeInventory { items, fail_for }),
            Arc::new(FakeDirectory {
                households,
                members,
            }),
            Arc::new(FakePreferences { windows }),
            Arc::clone(&sink) as Arc<dyn NotificationSink>,
            ExpiryWindows::default(),
        );
        Setup { engine, sink }
    }

    #[tokio::test]
    async fn test_second_run_creates_nothing() {
        let household = Uuid::new_v4();
        let user = Uuid::new_v4();
        let setup = engine_with(
            HashMap::from([(
                household,
                vec![item_expiring_in(household, 2), low_stock_item(household)],
            )]),
            vec![household],
            HashMap::from([(household, vec![user])]),
            HashMap::new(),
            HashSet::new(),
        );

        let first = setup.engine.run_scheduled().await.unwrap();
        // expiring-in-2 matches windows 7 and 3, plus one low-stock
        assert_eq!(first.created, 3);
        assert_eq!(first.scanned, 2);

        let second = setup.engine.run_scheduled().await.unwrap();
        assert_eq!(second.created, 0);
        assert_eq!(setup.sink.len(), 3);
    }

    #[tokio::test]
    async fn test_read_state_survives_rerun() {
        let household = Uuid::new_v4();
        let user = Uuid::new_v4();
        let setup = engine_with(
            HashMap::from([(household, vec![item_expiring_in(household, 2)])]),
            vec![household],
            HashMap::from([(household, vec![user])]),
            HashMap::new(),
            HashSet::new(),
        );

        setup.engine.run_scheduled().await.unwrap();
        let key = setup.sink.keys().into_iter().next().unwrap();
        setup.sink.mark_read(&key);

        let rerun = setup.engine.run_scheduled().await.unwrap();
        assert_eq!(rerun.created, 0);
        assert!(setup.sink.is_read(&key));
    }

    #[tokio::test]
    async fn test_scoped_run_does_not_touch_other_households() {
        let ours = Uuid::new_v4();
        let theirs = Uuid::new_v4();
        let our_user = Uuid::new_v4();
        let their_user = Uuid::new_v4();
        let setup = engine_with(
            HashMap::from([
                (ours, vec![low_stock_item(ours)]),
                (theirs, vec![low_stock_item(theirs)]),
            ]),
            vec![ours, theirs],
            HashMap::from([(ours, vec![our_user]), (theirs, vec![their_user])]),
            HashMap::new(),
            HashSet::new(),
        );

        let summary = setup
            .engine
            .run(GenerationRequest {
                scope: GenerationScope::Household(ours),
                recipients: RecipientMode::Single {
                    user_id: our_user,
                    windows: None,
                },
            })
            .await
            .unwrap();

        assert_eq!(summary.households, 1);
        assert_eq!(summary.created, 1);
        assert_eq!(setup.sink.recipients(), HashSet::from([our_user]));
    }

    #[tokio::test]
    async fn test_failing_household_does_not_abort_run() {
        let broken = Uuid::new_v4();
        let healthy = Uuid::new_v4();
        let user = Uuid::new_v4();
        let setup = engine_with(
            HashMap::from([(healthy, vec![low_stock_item(healthy)])]),
            vec![broken, healthy],
            HashMap::from([(broken, vec![user]), (healthy, vec![user])]),
            HashMap::new(),
            HashSet::from([broken]),
        );

        let summary = setup.engine.run_scheduled().await.unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.created, 1);
        assert_eq!(setup.sink.len(), 1);
    }

    #[tokio::test]
    async fn test_each_member_uses_own_windows() {
        let household = Uuid::new_v4();
        let narrow = Uuid::new_v4();
        let defaulted = Uuid::new_v4();
        let setup = engine_with(
            HashMap::from([(household, vec![item_expiring_in(household, 3)])]),
            vec![household],
            HashMap::from([(household, vec![narrow, defaulted])]),
            HashMap::from([(narrow, ExpiryWindows::from_days(&[1]).unwrap())]),
            HashSet::new(),
        );

        let summary = setup.engine.run_scheduled().await.unwrap();
        // narrow (1-day window) gets nothing for an item 3 days out;
        // defaulted ({7,3}) gets one candidate per matched window.
        assert_eq!(summary.created, 2);
        assert_eq!(setup.sink.recipients(), HashSet::from([defaulted]));
    }

    #[tokio::test]
    async fn test_override_windows_take_precedence() {
        let household = Uuid::new_v4();
        let user = Uuid::new_v4();
        let setup = engine_with(
            HashMap::from([(household, vec![item_expiring_in(household, 5)])]),
            vec![household],
            HashMap::from([(household, vec![user])]),
            HashMap::from([(user, ExpiryWindows::from_days(&[1]).unwrap())]),
            HashSet::new(),
        );

        let summary = setup
            .engine
            .run(GenerationRequest {
                scope: GenerationScope::Household(household),
                recipients: RecipientMode::Single {
                    user_id: user,
                    windows: ExpiryWindows::from_days(&[14]),
                },
            })
            .await
            .unwrap();

        assert_eq!(summary.created, 1);
    }
}
