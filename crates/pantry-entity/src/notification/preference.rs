//! Notification preference entity and lead-time window normalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Largest accepted lead-time window in days.
pub const MAX_WINDOW_DAYS: i64 = 90;

/// A normalized set of expiry lead-time windows.
///
/// Always non-empty, deduplicated, each value in `(0, 90]`, sorted
/// descending. The only way to construct one is through [`normalize`]
/// (or [`Default`]), so every holder can rely on those invariants.
///
/// [`normalize`]: ExpiryWindows::normalize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpiryWindows(Vec<i32>);

impl ExpiryWindows {
    /// Normalize raw JSON values into a window set.
    ///
    /// Non-integer, non-positive, and out-of-range entries are dropped
    /// silently; duplicates collapse; the result is sorted descending.
    /// Returns `None` when nothing survives — callers treat that as a
    /// validation failure.
    pub fn normalize(raw: &[serde_json::Value]) -> Option<Self> {
        let mut days: Vec<i32> = raw
            .iter()
            .filter_map(|v| v.as_i64())
            .filter(|&d| d > 0 && d <= MAX_WINDOW_DAYS)
            .map(|d| d as i32)
            .collect();
        days.sort_unstable_by(|a, b| b.cmp(a));
        days.dedup();
        if days.is_empty() { None } else { Some(Self(days)) }
    }

    /// Build a window set from already-validated day counts (e.g. rows
    /// loaded from the store). Applies the same normalization.
    pub fn from_days(days: &[i32]) -> Option<Self> {
        let values: Vec<serde_json::Value> =
            days.iter().map(|&d| serde_json::Value::from(d)).collect();
        Self::normalize(&values)
    }

    /// The windows, largest first.
    pub fn days(&self) -> &[i32] {
        &self.0
    }

    /// Consume into the underlying vector.
    pub fn into_vec(self) -> Vec<i32> {
        self.0
    }
}

impl Default for ExpiryWindows {
    /// The system default: remind 7 days and 3 days ahead.
    fn default() -> Self {
        Self(vec![7, 3])
    }
}

/// Per-user notification preferences. One row per user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreference {
    /// The user these preferences belong to.
    pub user_id: Uuid,
    /// Stored lead-time windows, largest first.
    pub expiry_windows: Vec<i32>,
    /// When preferences were last updated.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_drops_invalid_and_sorts_descending() {
        let raw = vec![json!(7), json!(7), json!(3), json!(-1), json!(100), json!("abc")];
        let windows = ExpiryWindows::normalize(&raw).unwrap();
        assert_eq!(windows.days(), &[7, 3]);
    }

    #[test]
    fn test_normalize_rejects_empty_result() {
        let raw = vec![json!(-1), json!(200)];
        assert!(ExpiryWindows::normalize(&raw).is_none());
        assert!(ExpiryWindows::normalize(&[]).is_none());
    }

    #[test]
    fn test_normalize_accepts_boundary_values() {
        let raw = vec![json!(1), json!(90)];
        let windows = ExpiryWindows::normalize(&raw).unwrap();
        assert_eq!(windows.days(), &[90, 1]);
    }

    #[test]
    fn test_from_days_renormalizes_stored_rows() {
        let windows = ExpiryWindows::from_days(&[3, 3, 14]).unwrap();
        assert_eq!(windows.days(), &[14, 3]);
    }

    #[test]
    fn test_default_windows() {
        assert_eq!(ExpiryWindows::default().days(), &[7, 3]);
    }
}
