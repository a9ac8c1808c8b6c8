//! Streak computation engine.
//!
//! This module implements the pure recomputation step:
//! - Collapse the workout log into distinct calendar days
//! - Compute current and longest streaks
//! - Unlock milestone badges (sticky, never re-locked)
//!
//! `compute_streak_data` takes `today` as an explicit parameter instead of
//! reading a clock, so results are deterministic and testable.

use crate::{MilestoneBadge, StreakData, WorkoutRecord};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Recompute streak state from the full workout log.
///
/// `previous` seeds the longest-streak ratchet and the set of already
/// unlocked badges; pass `StreakData::default()` when no prior state exists.
///
/// Returns the new `StreakData` together with the badges whose `unlocked`
/// flipped from false to true in this call.
pub fn compute_streak_data(
    workouts: &[WorkoutRecord],
    previous: &StreakData,
    today: NaiveDate,
) -> (StreakData, Vec<MilestoneBadge>) {
    let workout_dates = distinct_days(workouts, today);
    let days: Vec<NaiveDate> = workout_dates.iter().copied().collect();

    let current_streak = current_streak(&days, today);
    // Ratchet: longest never decreases, even if the log shrinks
    let longest_streak = longest_run(&days).max(previous.longest_streak);

    tracing::debug!(
        "Recomputed streaks: current={}, longest={}, distinct days={}",
        current_streak,
        longest_streak,
        days.len()
    );

    let (milestone_badges, newly_unlocked) =
        unlock_badges(previous, current_streak, longest_streak, today);

    let data = StreakData {
        current_streak,
        longest_streak,
        last_workout_date: days.last().copied(),
        workout_dates,
        milestone_badges,
    };

    (data, newly_unlocked)
}

/// Collapse workouts into distinct calendar days, dropping future-dated
/// entries relative to `today`
fn distinct_days(workouts: &[WorkoutRecord], today: NaiveDate) -> BTreeSet<NaiveDate> {
    let mut days = BTreeSet::new();
    for workout in workouts {
        let day = workout.calendar_day();
        if day > today {
            tracing::warn!(
                "Ignoring future-dated workout {} on {} (today is {})",
                workout.id,
                day,
                today
            );
            continue;
        }
        days.insert(day);
    }
    days
}

/// Count consecutive days ending at the most recent workout day.
///
/// A streak is active when the last workout was today (gap 0) or yesterday
/// (gap 1); any larger gap means the streak is broken.
fn current_streak(days: &[NaiveDate], today: NaiveDate) -> u32 {
    let Some(&most_recent) = days.last() else {
        return 0;
    };

    let gap = (today - most_recent).num_days();
    if gap > 1 {
        return 0;
    }

    let mut streak = 1u32;
    for i in (0..days.len().saturating_sub(1)).rev() {
        if (days[i + 1] - days[i]).num_days() == 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Longest run of consecutive days anywhere in the sorted day list
fn longest_run(days: &[NaiveDate]) -> u32 {
    if days.is_empty() {
        return 0;
    }

    let mut longest = 1u32;
    let mut run = 1u32;
    for pair in days.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
    }
    longest
}

/// Walk the catalog and carry forward or unlock each badge.
///
/// Already unlocked badges are copied from `previous` unchanged so their
/// original `unlocked_date` survives. Newly qualifying badges are stamped
/// with `today` and collected for notification.
fn unlock_badges(
    previous: &StreakData,
    current_streak: u32,
    longest_streak: u32,
    today: NaiveDate,
) -> (Vec<MilestoneBadge>, Vec<MilestoneBadge>) {
    let catalog = crate::catalog::get_default_catalog();
    let mut badges = Vec::with_capacity(catalog.milestones.len());
    let mut newly_unlocked = Vec::new();

    for spec in &catalog.milestones {
        let prior = previous
            .milestone_badges
            .iter()
            .find(|b| b.id == spec.id)
            .filter(|b| b.unlocked);

        if let Some(unlocked) = prior {
            badges.push(unlocked.clone());
            continue;
        }

        let mut badge = MilestoneBadge::locked(spec);
        if current_streak >= spec.threshold || longest_streak >= spec.threshold {
            badge.unlocked = true;
            badge.unlocked_date = Some(today);
            tracing::info!("Unlocked milestone '{}' ({} days)", badge.name, spec.threshold);
            newly_unlocked.push(badge.clone());
        }
        badges.push(badge);
    }

    (badges, newly_unlocked)
}

impl StreakData {
    /// Encouragement message bucketed by the current streak length
    pub fn message(&self) -> String {
        match self.current_streak {
            0 => "No active streak. Today is a great day to start one!".to_string(),
            1 => "Great start! Come back tomorrow to keep the streak alive.".to_string(),
            n @ 2..=6 => format!("{} days strong! Keep it going.", n),
            n @ 7..=29 => format!("On fire! {} days and counting.", n),
            n => format!("Unstoppable! {} straight days.", n),
        }
    }

    /// The lowest-threshold badge not yet unlocked, or None if all are earned
    pub fn next_milestone(&self) -> Option<&MilestoneBadge> {
        self.milestone_badges.iter().find(|b| !b.unlocked)
    }

    /// Days of streak still needed to reach the next milestone
    pub fn days_until_next_milestone(&self) -> u32 {
        self.next_milestone()
            .map(|b| b.threshold.saturating_sub(self.current_streak))
            .unwrap_or(0)
    }
}
