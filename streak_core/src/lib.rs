#![forbid(unsafe_code)]

//! Core domain model and business logic for the Streaks workout tracker.
//!
//! This crate provides:
//! - Domain types (workouts, streak data, milestone badges)
//! - Milestone catalog management
//! - Streak computation engine
//! - Persistence (WAL, CSV, streak state)
//! - Unlock notices for newly earned badges

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod wal;
pub mod csv_rollup;
pub mod state;
pub mod history;
pub mod engine;
pub mod notify;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::build_default_catalog;
pub use config::Config;
pub use wal::{JsonlSink, WorkoutSink};
pub use history::load_workouts;
pub use engine::compute_streak_data;
pub use notify::UnlockNotices;
