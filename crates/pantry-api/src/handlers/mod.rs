//! HTTP handlers, organized by domain.

pub mod auth;
pub mod grocery;
pub mod health;
pub mod household;
pub mod inventory;
pub mod notification;

use validator::Validate;

use pantry_core::error::AppError;

use crate::error::ApiError;

/// Run declarative DTO validation, mapping failures to a 400 response.
pub(crate) fn validated<T: Validate>(req: &T) -> Result<(), ApiError> {
    req.validate()
        .map_err(|e| ApiError(AppError::validation(format!("Validation failed: {e}"))))
}
