//! Household entity.

pub mod model;

pub use model::{Household, HouseholdMember, HouseholdSummary, MemberRole};
