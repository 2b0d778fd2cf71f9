//! Repository implementations.
//!
//! Each repository is a thin, strongly typed wrapper around SQL against
//! one table (or one aggregate). All errors map into `AppError` with
//! `ErrorKind::Database`, except unique-constraint violations, which
//! callers recognize via [`is_unique_violation`] and translate.

pub mod grocery_list;
pub mod household;
pub mod inventory;
pub mod notification;
pub mod preference;
pub mod user;

/// PostgreSQL SQLSTATE code for unique-constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Whether the given sqlx error is a unique-constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == UNIQUE_VIOLATION)
        .unwrap_or(false)
}
