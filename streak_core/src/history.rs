//! Workout history loading.
//!
//! The streak engine needs the complete workout log, so this module merges
//! the live WAL with the CSV archive, deduplicates by workout id, and
//! returns everything sorted oldest first.

use crate::{Result, WorkoutRecord};
use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

/// CSV row format for reading archived workouts
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    performed_at: String,
    activity: String,
    duration_minutes: Option<u32>,
    calories: Option<u32>,
    notes: Option<String>,
}

impl TryFrom<CsvRow> for WorkoutRecord {
    type Error = crate::Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| crate::Error::Other(format!("Invalid UUID: {}", e)))?;

        let performed_at = DateTime::parse_from_rfc3339(&row.performed_at)
            .map_err(|e| crate::Error::Other(format!("Invalid date: {}", e)))?
            .with_timezone(&Utc);

        Ok(WorkoutRecord {
            id,
            performed_at,
            activity: row.activity,
            duration_minutes: row.duration_minutes,
            calories: row.calories,
            notes: row.notes,
        })
    }
}

/// Load the full workout history from both WAL and CSV
///
/// Returns workouts sorted by performed_at (oldest first).
/// Automatically deduplicates workouts that appear in both WAL and CSV.
pub fn load_workouts(wal_path: &Path, csv_path: &Path) -> Result<Vec<WorkoutRecord>> {
    let mut workouts = Vec::new();
    let mut seen_ids = HashSet::new();

    // Load from WAL first (most recent)
    if wal_path.exists() {
        let wal_workouts = crate::wal::read_workouts(wal_path)?;
        for workout in wal_workouts {
            seen_ids.insert(workout.id);
            workouts.push(workout);
        }
        tracing::debug!("Loaded {} workouts from WAL", workouts.len());
    }

    // Load from CSV (archived)
    if csv_path.exists() {
        let csv_workouts = load_workouts_from_csv(csv_path)?;
        let mut csv_count = 0;
        for workout in csv_workouts {
            if !seen_ids.contains(&workout.id) {
                seen_ids.insert(workout.id);
                workouts.push(workout);
                csv_count += 1;
            }
        }
        tracing::debug!("Loaded {} workouts from CSV", csv_count);
    }

    // Sort by performed_at, oldest first
    workouts.sort_by(|a, b| a.performed_at.cmp(&b.performed_at));

    tracing::info!("Loaded {} total workouts", workouts.len());

    Ok(workouts)
}

/// Load all workouts from a CSV file
fn load_workouts_from_csv(path: &Path) -> Result<Vec<WorkoutRecord>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut workouts = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match WorkoutRecord::try_from(row) {
                Ok(workout) => workouts.push(workout),
                Err(e) => {
                    tracing::warn!("Failed to parse CSV row: {}", e);
                    // Continue processing other rows
                }
            },
            Err(e) => {
                tracing::warn!("Failed to deserialize CSV row: {}", e);
            }
        }
    }

    Ok(workouts)
}
