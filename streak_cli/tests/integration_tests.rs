//! Integration tests for the streak_cli binary.
//!
//! These tests verify end-to-end behavior including:
//! - Workout logging workflow
//! - Streak recomputation and persistence
//! - Milestone unlocking
//! - CSV rollup operations

use assert_cmd::Command;
use chrono::{Duration, Utc};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("streaks"))
}

/// Format a day `days_ago` before today as YYYY-MM-DD
fn day_arg(days_ago: i64) -> String {
    (Utc::now().date_naive() - Duration::days(days_ago))
        .format("%Y-%m-%d")
        .to_string()
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout streak tracking system"));
}

#[test]
fn test_log_creates_directories() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--activity")
        .arg("run")
        .assert()
        .success();

    // Verify directories and files were created
    assert!(data_dir.join("wal").exists());
    assert!(data_dir.join("wal/workouts.wal").exists());
    assert!(data_dir.join("wal/streaks.json").exists());
}

#[test]
fn test_workout_logged_to_wal() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--activity")
        .arg("swim")
        .arg("--duration")
        .arg("45")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout logged"));

    let wal_path = data_dir.join("wal/workouts.wal");
    let wal_content = fs::read_to_string(&wal_path).expect("Failed to read WAL");
    assert!(!wal_content.is_empty());
    assert!(wal_content.contains("swim"));
}

#[test]
fn test_status_on_empty_history() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Current streak: 0 day"))
        .stdout(predicate::str::contains("Last workout:   never"));
}

#[test]
fn test_status_is_default_command() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("WORKOUT STREAK"));
}

#[test]
fn test_log_then_status_shows_one_day() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Current streak: 1 day"))
        .stdout(predicate::str::contains("Longest streak: 1 day"));
}

#[test]
fn test_same_day_workouts_do_not_double_count() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    for activity in ["run", "gym"] {
        cli()
            .arg("log")
            .arg("--data-dir")
            .arg(&data_dir)
            .arg("--activity")
            .arg(activity)
            .assert()
            .success();
    }

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Current streak: 1 day"));
}

#[test]
fn test_backfill_builds_streak() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Three consecutive days ending today
    for days_ago in [2, 1, 0] {
        cli()
            .arg("log")
            .arg("--data-dir")
            .arg(&data_dir)
            .arg("--date")
            .arg(day_arg(days_ago))
            .assert()
            .success();
    }

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Current streak: 3 day"));
}

#[test]
fn test_seven_day_streak_unlocks_badge() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    for days_ago in (0..=6).rev() {
        cli()
            .arg("log")
            .arg("--data-dir")
            .arg(&data_dir)
            .arg("--date")
            .arg(day_arg(days_ago))
            .assert()
            .success();
    }

    // The final log crossed the 7-day threshold
    cli()
        .arg("badges")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("[✓]"))
        .stdout(predicate::str::contains("One Week Warrior"));
}

#[test]
fn test_unlock_announced_on_log() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    for days_ago in (1..=6).rev() {
        cli()
            .arg("log")
            .arg("--data-dir")
            .arg(&data_dir)
            .arg("--date")
            .arg(day_arg(days_ago))
            .assert()
            .success();
    }

    // The seventh consecutive day triggers the announcement exactly once
    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Milestone unlocked: One Week Warrior"));

    // A further workout must not re-announce it
    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--activity")
        .arg("stretch")
        .assert()
        .success()
        .stdout(predicate::str::contains("Milestone unlocked").not());
}

#[test]
fn test_badges_lists_full_catalog() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("badges")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("(7 days)"))
        .stdout(predicate::str::contains("(365 days)"));
}

#[test]
fn test_rollup_preserves_streak() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    cli()
        .arg("rollup")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rolled up 1 workout"));

    // CSV created, WAL archived
    assert!(data_dir.join("workouts.csv").exists());
    assert!(!data_dir.join("wal/workouts.wal").exists());

    // History now comes from the CSV archive; the streak survives
    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Current streak: 1 day"));
}

#[test]
fn test_rollup_cleanup_removes_processed() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    cli()
        .arg("rollup")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--cleanup")
        .assert()
        .success();

    assert!(!data_dir.join("wal/workouts.wal.processed").exists());
}

#[test]
fn test_state_file_is_valid_json() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("log")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    let state_content =
        fs::read_to_string(data_dir.join("wal/streaks.json")).expect("State should exist");
    let parsed: serde_json::Value =
        serde_json::from_str(&state_content).expect("State should be valid JSON");

    assert_eq!(parsed["current_streak"], 1);
    assert_eq!(
        parsed["milestone_badges"].as_array().map(|a| a.len()),
        Some(7)
    );
}
