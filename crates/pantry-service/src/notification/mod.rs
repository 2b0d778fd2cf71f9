//! The notification generation engine and lifecycle service.
//!
//! Layout mirrors the data flow: [`stores`] defines the contracts the
//! engine consumes, [`evaluator`] is the pure rule logic, [`engine`] is
//! the orchestrator persisting candidates idempotently, and [`service`]
//! exposes the user-facing lifecycle operations.

pub mod engine;
pub mod evaluator;
pub mod service;
pub mod stores;

pub use engine::{GenerationEngine, GenerationRequest, GenerationScope, RecipientMode, RunSummary};
pub use service::NotificationService;
