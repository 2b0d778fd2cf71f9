//! # pantry-api
//!
//! HTTP API layer for Smart Pantry: the Axum router, application state,
//! authentication extractor, request/response DTOs, and handlers.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
