//! Notification candidate value object.
//!
//! A candidate is the evaluator's output: one logical "this condition
//! holds right now" fact, fully populated except for storage-assigned
//! fields and the recipient. The dedupe key is derived deterministically
//! from the candidate plus the recipient, so repeated evaluations of the
//! same condition always map to the same stored row.

use chrono::NaiveDate;
use uuid::Uuid;

use super::model::{NewNotification, NotificationKind};

/// A single notification the engine believes should exist right now.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationCandidate {
    /// The condition that fired.
    pub kind: NotificationKind,
    /// The triggering inventory item.
    pub item_id: Uuid,
    /// The item's name at evaluation time.
    pub item_name: String,
    /// Matched lead-time window for expiry candidates.
    pub window_days: Option<i32>,
    /// The item's expiry date for expiry candidates.
    pub expiry_date: Option<NaiveDate>,
    /// The calendar date of the generation run.
    pub run_date: NaiveDate,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl NotificationCandidate {
    /// Build a low-stock candidate.
    ///
    /// Low-stock fires once per (recipient, item) per calendar day while
    /// the condition holds — the run date is the dedupe discriminator, so
    /// quantity changes within a day do not re-notify.
    pub fn low_stock(
        item_id: Uuid,
        item_name: &str,
        quantity: f64,
        threshold: f64,
        run_date: NaiveDate,
    ) -> Self {
        Self {
            kind: NotificationKind::LowStock,
            item_id,
            item_name: item_name.to_string(),
            window_days: None,
            expiry_date: None,
            run_date,
            title: format!("{item_name} is low"),
            message: format!(
                "{item_name} is at {quantity}. Your threshold is {threshold}. \
                 Add it to your grocery list when ready."
            ),
        }
    }

    /// Build an expiry candidate for one matched lead-time window.
    ///
    /// An item inside several configured windows produces one candidate
    /// per window; each is separately dedupable and dismissible.
    pub fn expiry(
        item_id: Uuid,
        item_name: &str,
        expiry_date: NaiveDate,
        window_days: i32,
        days_left: i64,
        run_date: NaiveDate,
    ) -> Self {
        let day_word = if days_left == 1 { "day" } else { "days" };
        Self {
            kind: NotificationKind::Expiry,
            item_id,
            item_name: item_name.to_string(),
            window_days: Some(window_days),
            expiry_date: Some(expiry_date),
            run_date,
            title: format!("{item_name} expires in {days_left} {day_word}"),
            message: format!("{item_name} expires on {expiry_date}"),
        }
    }

    /// Compute the canonical dedupe key for this candidate and recipient.
    ///
    /// Grammar:
    /// - `LOW_STOCK:{user}:{item}:{run date}` — re-fires daily while the
    ///   condition holds.
    /// - `EXPIRY:{user}:{item}:{window}:{expiry date}` — stable for the
    ///   lifetime of the condition, so it fires exactly once per window.
    pub fn dedupe_key(&self, recipient: Uuid) -> String {
        match self.kind {
            NotificationKind::LowStock => format!(
                "{}:{}:{}:{}",
                self.kind.as_str(),
                recipient,
                self.item_id,
                self.run_date
            ),
            NotificationKind::Expiry => format!(
                "{}:{}:{}:{}:{}",
                self.kind.as_str(),
                recipient,
                self.item_id,
                self.window_days.unwrap_or_default(),
                self.expiry_date.unwrap_or(self.run_date)
            ),
        }
    }

    /// Materialize this candidate for a specific household and recipient.
    pub fn for_recipient(&self, household_id: Uuid, recipient: Uuid) -> NewNotification {
        NewNotification {
            household_id,
            user_id: recipient,
            kind: self.kind,
            item_id: self.item_id,
            title: self.title.clone(),
            message: self.message.clone(),
            window_days: self.window_days,
            dedupe_key: self.dedupe_key(recipient),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dedupe_key_stable_across_evaluations() {
        let item = Uuid::new_v4();
        let user = Uuid::new_v4();
        let run = date(2025, 3, 10);

        let a = NotificationCandidate::expiry(item, "Milk", date(2025, 3, 13), 7, 3, run);
        let b = NotificationCandidate::expiry(item, "Milk", date(2025, 3, 13), 7, 3, run);
        assert_eq!(a.dedupe_key(user), b.dedupe_key(user));
    }

    #[test]
    fn test_dedupe_key_scoped_per_recipient() {
        let item = Uuid::new_v4();
        let run = date(2025, 3, 10);
        let c = NotificationCandidate::low_stock(item, "Eggs", 2.0, 6.0, run);

        let a = c.dedupe_key(Uuid::new_v4());
        let b = c.dedupe_key(Uuid::new_v4());
        assert_ne!(a, b);
    }

    #[test]
    fn test_expiry_key_varies_by_window() {
        let item = Uuid::new_v4();
        let user = Uuid::new_v4();
        let run = date(2025, 3, 10);
        let exp = date(2025, 3, 12);

        let seven = NotificationCandidate::expiry(item, "Milk", exp, 7, 2, run);
        let three = NotificationCandidate::expiry(item, "Milk", exp, 3, 2, run);
        assert_ne!(seven.dedupe_key(user), three.dedupe_key(user));
    }

    #[test]
    fn test_low_stock_key_rolls_over_by_day() {
        let item = Uuid::new_v4();
        let user = Uuid::new_v4();

        let today = NotificationCandidate::low_stock(item, "Eggs", 2.0, 6.0, date(2025, 3, 10));
        let tomorrow = NotificationCandidate::low_stock(item, "Eggs", 1.0, 6.0, date(2025, 3, 11));
        assert_ne!(today.dedupe_key(user), tomorrow.dedupe_key(user));
    }

    #[test]
    fn test_low_stock_key_ignores_quantity_changes() {
        let item = Uuid::new_v4();
        let user = Uuid::new_v4();
        let run = date(2025, 3, 10);

        let at_two = NotificationCandidate::low_stock(item, "Eggs", 2.0, 6.0, run);
        let at_one = NotificationCandidate::low_stock(item, "Eggs", 1.0, 6.0, run);
        assert_eq!(at_two.dedupe_key(user), at_one.dedupe_key(user));
    }

    #[test]
    fn test_expiry_title_pluralization() {
        let item = Uuid::new_v4();
        let run = date(2025, 3, 10);
        let one = NotificationCandidate::expiry(item, "Milk", date(2025, 3, 11), 3, 1, run);
        let two = NotificationCandidate::expiry(item, "Milk", date(2025, 3, 12), 3, 2, run);
        assert_eq!(one.title, "Milk expires in 1 day");
        assert_eq!(two.title, "Milk expires in 2 days");
    }
}
