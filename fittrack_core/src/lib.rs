#![forbid(unsafe_code)]

//! Core domain model and business logic for the Fittrack system.
//!
//! This crate provides:
//! - Domain types (users, fitness details, measurements, workouts)
//! - Metrics engine (BMI, BMR/calories, macro split, validation)
//! - Profile store (repository abstraction + JSON persistence)
//! - Auth flows (register/login/logout over the store)
//! - Insights and admin aggregation
//! - Measurement export (CSV)

pub mod types;
pub mod error;
pub mod metrics;
pub mod config;
pub mod logging;
pub mod store;
pub mod auth;
pub mod insights;
pub mod admin;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use store::{JsonStore, MemoryStore, Repository};
pub use metrics::{Validation, MacroSplit};
pub use insights::{progress_insights, workout_stats, ProgressInsights, WorkoutStats};
pub use admin::{global_stats, GlobalStats};
pub use export::export_measurements;
