#![forbid(unsafe_code)]

//! Core domain model and scheduling logic for the Repcycle system.
//!
//! This crate provides:
//! - Domain types (exercises, cycles, groups, generated workouts/sets)
//! - Cycle validation
//! - Calendar date mapping for date-scheduled cycles
//! - Schedule generation
//! - Progression target calculation
//! - Caller-side collaborators (exercise catalog, max-record loading,
//!   schedule persistence)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod validate;
pub mod calendar;
pub mod schedule;
pub mod progression;
pub mod maxes;
pub mod store;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use validate::{validate_cycle, Validation};
pub use calendar::dates_for;
pub use schedule::{generate_schedule, GeneratedSchedule};
pub use progression::{target_for, weight_for};
pub use maxes::load_max_records;
pub use store::{load_schedule, save_schedule, JsonlSink, WorkoutSink};
