//! Pure notification rule evaluation.
//!
//! Given a household's inventory snapshot, the run's calendar date, and a
//! set of expiry lead-time windows, compute every notification candidate
//! that should exist right now. No I/O, fully deterministic; this
//! function never fails — an item with unusable data is skipped, never
//! aborts the evaluation.

use chrono::NaiveDate;

use pantry_entity::inventory::InventoryItem;
use pantry_entity::notification::candidate::NotificationCandidate;
use pantry_entity::notification::preference::ExpiryWindows;

/// Evaluate the low-stock and expiry rules for every item independently.
///
/// - **Low-stock**: fires while `threshold > 0 && quantity <= threshold`.
///   Window-independent; the candidate's run date makes it dedupe to once
///   per calendar day, not once per quantity value.
/// - **Expiry**: for an item expiring on or after `today`, one candidate
///   per window `w` with `days_until <= w`, at calendar-day granularity.
///   An item expiring in 2 days matches both a 7-day and a 3-day window;
///   an already-expired item matches nothing.
pub fn evaluate(
    items: &[InventoryItem],
    today: NaiveDate,
    windows: &ExpiryWindows,
) -> Vec<NotificationCandidate> {
    let mut candidates = Vec::new();

    for item in items {
        if item.quantity.is_finite()
            && item.threshold.is_finite()
            && item.threshold > 0.0
            && item.quantity <= item.threshold
        {
            candidates.push(NotificationCandidate::low_stock(
                item.id,
                &item.name,
                item.quantity,
                item.threshold,
                today,
            ));
        }

        if let Some(expiry) = item.expiry_date {
            let days_left = (expiry - today).num_days();
            if days_left >= 0 {
                for &window in windows.days() {
                    if days_left <= i64::from(window) {
                        candidates.push(NotificationCandidate::expiry(
                            item.id,
                            &item.name,
                            expiry,
                            window,
                            days_left,
                            today,
                        ));
                    }
                }
            }
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pantry_entity::notification::model::NotificationKind;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn item(quantity: f64, threshold: f64, expiry_in_days: Option<i64>) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            household_id: Uuid::new_v4(),
            name: "Milk".to_string(),
            category: "Dairy".to_string(),
            quantity,
            unit: "l".to_string(),
            threshold,
            expiry_date: expiry_in_days.map(|d| today() + Duration::days(d)),
            location: "fridge".to_string(),
            last_updated_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn windows(days: &[i32]) -> ExpiryWindows {
        ExpiryWindows::from_days(days).unwrap()
    }

    fn kinds(candidates: &[NotificationCandidate]) -> Vec<NotificationKind> {
        candidates.iter().map(|c| c.kind).collect()
    }

    #[test]
    fn test_low_stock_fires_at_threshold() {
        let items = vec![item(5.0, 5.0, None)];
        let candidates = evaluate(&items, today(), &windows(&[7, 3]));
        assert_eq!(kinds(&candidates), vec![NotificationKind::LowStock]);
    }

    #[test]
    fn test_low_stock_does_not_fire_above_threshold() {
        let items = vec![item(6.0, 5.0, None)];
        assert!(evaluate(&items, today(), &windows(&[7, 3])).is_empty());
    }

    #[test]
    fn test_zero_threshold_never_fires() {
        let items = vec![item(0.0, 0.0, None)];
        assert!(evaluate(&items, today(), &windows(&[7, 3])).is_empty());
    }

    #[test]
    fn test_non_finite_quantity_skips_item() {
        let items = vec![item(f64::NAN, 5.0, None)];
        assert!(evaluate(&items, today(), &windows(&[7, 3])).is_empty());
    }

    #[test]
    fn test_expiry_in_three_days_matches_both_windows() {
        let items = vec![item(10.0, 0.0, Some(3))];
        let candidates = evaluate(&items, today(), &windows(&[7, 3]));

        let matched: Vec<i32> = candidates.iter().filter_map(|c| c.window_days).collect();
        assert_eq!(matched, vec![7, 3]);
    }

    #[test]
    fn test_expiry_in_five_days_matches_seven_only() {
        let items = vec![item(10.0, 0.0, Some(5))];
        let candidates = evaluate(&items, today(), &windows(&[7, 3]));

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].window_days, Some(7));
    }

    #[test]
    fn test_expiry_beyond_all_windows_matches_nothing() {
        let items = vec![item(10.0, 0.0, Some(10))];
        assert!(evaluate(&items, today(), &windows(&[7, 3])).is_empty());
    }

    #[test]
    fn test_past_expiry_matches_nothing() {
        let items = vec![item(10.0, 0.0, Some(-1))];
        assert!(evaluate(&items, today(), &windows(&[7, 3])).is_empty());
    }

    #[test]
    fn test_expiring_today_matches_every_window() {
        let items = vec![item(10.0, 0.0, Some(0))];
        let candidates = evaluate(&items, today(), &windows(&[7, 3]));
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_expiry_at_exact_window_boundary_fires() {
        let items = vec![item(10.0, 0.0, Some(7))];
        let candidates = evaluate(&items, today(), &windows(&[7, 3]));

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].window_days, Some(7));
    }

    #[test]
    fn test_rules_are_independent_per_item() {
        let items = vec![item(2.0, 5.0, Some(2))];
        let candidates = evaluate(&items, today(), &windows(&[7, 3]));

        assert_eq!(
            kinds(&candidates),
            vec![
                NotificationKind::LowStock,
                NotificationKind::Expiry,
                NotificationKind::Expiry,
            ]
        );
    }

    #[test]
    fn test_deterministic_for_fixed_inputs() {
        let items = vec![item(2.0, 5.0, Some(2)), item(9.0, 1.0, Some(6))];
        let first = evaluate(&items, today(), &windows(&[7, 3]));
        let second = evaluate(&items, today(), &windows(&[7, 3]));
        assert_eq!(first, second);
    }
}
