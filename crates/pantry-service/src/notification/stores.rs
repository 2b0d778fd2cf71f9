//! Store contracts consumed by the generation engine.
//!
//! The engine depends on these four narrow traits instead of concrete
//! repositories so its idempotency and isolation properties can be
//! exercised without a database. The inventory side is read-only by
//! contract: the engine never mutates inventory.

use async_trait::async_trait;
use uuid::Uuid;

use pantry_core::result::AppResult;
use pantry_database::repositories::household::HouseholdRepository;
use pantry_database::repositories::inventory::InventoryRepository;
use pantry_database::repositories::notification::NotificationRepository;
use pantry_database::repositories::preference::PreferenceRepository;
use pantry_entity::inventory::InventoryItem;
use pantry_entity::notification::model::NewNotification;
use pantry_entity::notification::preference::ExpiryWindows;

/// Read-only view of a household's inventory.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Fetch every inventory item belonging to the household.
    async fn items_for_household(&self, household_id: Uuid) -> AppResult<Vec<InventoryItem>>;
}

/// Enumeration of households and their members.
#[async_trait]
pub trait HouseholdDirectory: Send + Sync {
    /// Ids of every household in the system.
    async fn all_household_ids(&self) -> AppResult<Vec<Uuid>>;

    /// User ids of every member of the household.
    async fn members_of(&self, household_id: Uuid) -> AppResult<Vec<Uuid>>;
}

/// Per-user expiry lead-time windows.
#[async_trait]
pub trait PreferenceSource: Send + Sync {
    /// The user's stored windows, or `None` when they have no preference.
    async fn windows_for(&self, user_id: Uuid) -> AppResult<Option<ExpiryWindows>>;
}

/// At-most-once notification persistence.
///
/// This is the idempotency contract: the implementation must be an
/// atomic conditional insert keyed on `dedupe_key` (enforced by the
/// storage layer, not emulated with a read-then-write), and an existing
/// row must be left untouched so read/dismiss state survives re-runs.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Insert unless the dedupe key exists. Returns `true` when created.
    async fn insert_if_absent(&self, notification: &NewNotification) -> AppResult<bool>;

    /// Ensure the store's uniqueness constraint on the dedupe key exists.
    ///
    /// Called once at startup. A failure degrades duplicate prevention;
    /// the caller logs it and continues, never exits.
    async fn ensure_schema(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl InventorySource for InventoryRepository {
    async fn items_for_household(&self, household_id: Uuid) -> AppResult<Vec<InventoryItem>> {
        InventoryRepository::items_for_household(self, household_id).await
    }
}

#[async_trait]
impl HouseholdDirectory for HouseholdRepository {
    async fn all_household_ids(&self) -> AppResult<Vec<Uuid>> {
        HouseholdRepository::all_household_ids(self).await
    }

    async fn members_of(&self, household_id: Uuid) -> AppResult<Vec<Uuid>> {
        HouseholdRepository::members_of(self, household_id).await
    }
}

#[async_trait]
impl PreferenceSource for PreferenceRepository {
    async fn windows_for(&self, user_id: Uuid) -> AppResult<Option<ExpiryWindows>> {
        let stored = self.get(user_id).await?;
        Ok(stored.and_then(|p| ExpiryWindows::from_days(&p.expiry_windows)))
    }
}

#[async_trait]
impl NotificationSink for NotificationRepository {
    async fn insert_if_absent(&self, notification: &NewNotification) -> AppResult<bool> {
        NotificationRepository::insert_if_absent(self, notification).await
    }

    async fn ensure_schema(&self) -> AppResult<()> {
        self.ensure_dedupe_index().await
    }
}
