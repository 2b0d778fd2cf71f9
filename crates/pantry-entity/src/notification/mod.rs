//! Notification entities: the stored record, the evaluator's candidate
//! value object, and per-user preferences.

pub mod candidate;
pub mod model;
pub mod preference;

pub use candidate::NotificationCandidate;
pub use model::{NewNotification, Notification, NotificationKind};
pub use preference::{ExpiryWindows, NotificationPreference};
