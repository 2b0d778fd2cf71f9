//! # pantry-worker
//!
//! Background scheduling for Smart Pantry. Owns the cron timer that
//! drives recurring notification generation runs.

pub mod scheduler;

pub use scheduler::NotificationScheduler;
