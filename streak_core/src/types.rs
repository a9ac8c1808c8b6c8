//! Core domain types for the Streaks workout tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workout records (the unit of the workout log)
//! - Milestone badges and their unlock state
//! - Streak data (the durable, user-visible result of recomputation)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

// ============================================================================
// Workout Types
// ============================================================================

/// A single logged workout.
///
/// Only the calendar day of `performed_at` matters for streak computation;
/// the remaining fields are carried for display and archival.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub performed_at: DateTime<Utc>,
    pub activity: String,
    pub duration_minutes: Option<u32>,
    pub calories: Option<u32>,
    pub notes: Option<String>,
}

impl WorkoutRecord {
    /// The calendar day this workout counts toward (UTC day).
    pub fn calendar_day(&self) -> NaiveDate {
        self.performed_at.date_naive()
    }
}

// ============================================================================
// Milestone Types
// ============================================================================

/// Static definition of a milestone in the catalog
#[derive(Clone, Debug)]
pub struct MilestoneSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub threshold: u32,
}

/// Unlock state for one milestone threshold.
///
/// `unlocked` is sticky: once true it never reverts, and `unlocked_date`
/// keeps the day of the original unlock.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MilestoneBadge {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub threshold: u32,
    pub unlocked: bool,
    pub unlocked_date: Option<NaiveDate>,
}

impl MilestoneBadge {
    /// A locked badge seeded from its catalog entry
    pub fn locked(spec: &MilestoneSpec) -> Self {
        Self {
            id: spec.id.to_string(),
            name: spec.name.to_string(),
            emoji: spec.emoji.to_string(),
            description: spec.description.to_string(),
            threshold: spec.threshold,
            unlocked: false,
            unlocked_date: None,
        }
    }
}

// ============================================================================
// Streak Data
// ============================================================================

/// Durable streak state, recomputed from the workout log after every change.
///
/// `longest_streak` is a monotonic ratchet: it folds in the previously
/// persisted value and never decreases. `milestone_badges` always holds
/// exactly one entry per catalog threshold, in ascending threshold order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreakData {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_workout_date: Option<NaiveDate>,
    pub workout_dates: BTreeSet<NaiveDate>,
    pub milestone_badges: Vec<MilestoneBadge>,
}

impl Default for StreakData {
    fn default() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_workout_date: None,
            workout_dates: BTreeSet::new(),
            milestone_badges: crate::catalog::get_default_catalog().locked_badges(),
        }
    }
}

// ============================================================================
// Catalog Type
// ============================================================================

/// The complete catalog of milestone definitions, ascending by threshold
#[derive(Clone, Debug)]
pub struct Catalog {
    pub milestones: Vec<MilestoneSpec>,
}
