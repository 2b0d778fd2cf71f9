//! Household creation, joining, and lookup.

pub mod service;

pub use service::HouseholdService;
