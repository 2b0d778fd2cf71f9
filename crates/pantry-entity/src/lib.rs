//! # pantry-entity
//!
//! Domain entity models for Smart Pantry. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod grocery;
pub mod household;
pub mod inventory;
pub mod notification;
pub mod user;
