//! Household creation, joining, and lookup.

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use pantry_core::error::{AppError, ErrorKind};
use pantry_core::result::AppResult;
use pantry_database::repositories::household::HouseholdRepository;
use pantry_database::repositories::user::UserRepository;
use pantry_entity::household::{HouseholdSummary, MemberRole};

use crate::context::RequestContext;

/// Invite code alphabet: uppercase letters and digits without the
/// ambiguous 0/O/1/I.
const INVITE_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Invite code length.
const INVITE_CODE_LENGTH: usize = 8;

/// Attempts before giving up on finding an unused invite code.
const INVITE_CODE_RETRIES: usize = 10;

/// Manages household membership. One household per user.
pub struct HouseholdService {
    /// Household repository.
    households: Arc<HouseholdRepository>,
    /// User repository.
    users: Arc<UserRepository>,
}

impl HouseholdService {
    /// Creates a new household service.
    pub fn new(households: Arc<HouseholdRepository>, users: Arc<UserRepository>) -> Self {
        Self { households, users }
    }

    /// Creates a household owned by the caller.
    pub async fn create(&self, ctx: &RequestContext, name: &str) -> AppResult<HouseholdSummary> {
        let user = self
            .users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if user.household_id.is_some() {
            return Err(AppError::conflict("User already belongs to a household"));
        }

        // The unique constraint on invite_code arbitrates collisions;
        // retry with a fresh code instead of select-then-insert.
        let mut household = None;
        for _ in 0..INVITE_CODE_RETRIES {
            let code = generate_invite_code();
            match self.households.create(name, &code, user.id).await {
                Ok(h) => {
                    household = Some(h);
                    break;
                }
                Err(e) if e.kind == ErrorKind::Conflict => continue,
                Err(e) => return Err(e),
            }
        }
        let household = household
            .ok_or_else(|| AppError::internal("Failed to generate invite code. Try again."))?;

        self.users
            .set_household(user.id, Some(household.id))
            .await?;

        info!(household_id = %household.id, owner = %user.id, "Household created");
        Ok(HouseholdSummary::new(household, 1))
    }

    /// Joins the caller to the household matching the invite code.
    pub async fn join(&self, ctx: &RequestContext, invite_code: &str) -> AppResult<HouseholdSummary> {
        let user = self
            .users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if user.household_id.is_some() {
            return Err(AppError::conflict("User already belongs to a household"));
        }

        let household = self
            .households
            .find_by_invite_code(invite_code.trim())
            .await?
            .ok_or_else(|| AppError::not_found("Invalid invite code"))?;

        self.households
            .add_member(household.id, user.id, MemberRole::Member)
            .await?;
        self.users
            .set_household(user.id, Some(household.id))
            .await?;

        let members_count = self.households.member_count(household.id).await?;
        info!(household_id = %household.id, user = %user.id, "User joined household");
        Ok(HouseholdSummary::new(household, members_count))
    }

    /// Returns the caller's current household, if any.
    ///
    /// If the user points at a household that no longer exists, the
    /// stale reference is cleared.
    pub async fn current(&self, ctx: &RequestContext) -> AppResult<Option<HouseholdSummary>> {
        let user = self
            .users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let Some(household_id) = user.household_id else {
            return Ok(None);
        };

        match self.households.find_by_id(household_id).await? {
            Some(household) => {
                let members_count = self.households.member_count(household.id).await?;
                Ok(Some(HouseholdSummary::new(household, members_count)))
            }
            None => {
                self.users.set_household(user.id, None).await?;
                Ok(None)
            }
        }
    }
}

/// Generate a human-friendly invite code.
fn generate_invite_code() -> String {
    let mut rng = rand::rng();
    (0..INVITE_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..INVITE_CODE_ALPHABET.len());
            INVITE_CODE_ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_code_shape() {
        let code = generate_invite_code();
        assert_eq!(code.len(), INVITE_CODE_LENGTH);
        assert!(code.bytes().all(|b| INVITE_CODE_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_invite_code_avoids_ambiguous_characters() {
        for _ in 0..100 {
            let code = generate_invite_code();
            assert!(!code.contains(['0', 'O', '1', 'I']));
        }
    }
}
