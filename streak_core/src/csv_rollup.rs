//! CSV rollup functionality for archiving WAL workouts.
//!
//! This module implements atomic WAL-to-CSV conversion with proper error
//! handling to prevent data loss.

use crate::{Result, WorkoutRecord};
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    performed_at: String,
    activity: String,
    duration_minutes: Option<u32>,
    calories: Option<u32>,
    notes: Option<String>,
}

impl From<&WorkoutRecord> for CsvRow {
    fn from(workout: &WorkoutRecord) -> Self {
        CsvRow {
            id: workout.id.to_string(),
            performed_at: workout.performed_at.to_rfc3339(),
            activity: workout.activity.clone(),
            duration_minutes: workout.duration_minutes,
            calories: workout.calories,
            notes: workout.notes.clone(),
        }
    }
}

/// Roll up WAL workouts into CSV and archive the WAL atomically
///
/// This function:
/// 1. Reads all workouts from the WAL
/// 2. Appends them to the CSV file (creates with headers if needed)
/// 3. Syncs the CSV to disk
/// 4. Renames the WAL to .processed
/// 5. Returns the number of workouts processed
///
/// # Safety
/// - CSV is fsynced before WAL is renamed
/// - WAL is renamed (not deleted) to allow manual recovery if needed
/// - Processed WAL files can be cleaned up manually
pub fn wal_to_csv_and_archive(wal_path: &Path, csv_path: &Path) -> Result<usize> {
    // Read all workouts from WAL
    let workouts = crate::wal::read_workouts(wal_path)?;

    if workouts.is_empty() {
        tracing::info!("No workouts in WAL to roll up");
        return Ok(0);
    }

    // Ensure parent directory exists
    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Open CSV file for appending
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    // Only the first write gets headers
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for workout in &workouts {
        let row = CsvRow::from(workout);
        writer.serialize(row)?;
    }

    // Flush and sync to disk
    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Wrote {} workouts to CSV", workouts.len());

    // Atomically archive the WAL by renaming it
    let processed_path = wal_path.with_extension("wal.processed");
    std::fs::rename(wal_path, &processed_path)?;

    tracing::info!("Archived WAL to {:?}", processed_path);

    Ok(workouts.len())
}

/// Clean up old processed WAL files
///
/// This removes all .wal.processed files in the given directory.
pub fn cleanup_processed_wals(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(extension) = path.extension() {
            if extension == "processed" {
                std::fs::remove_file(&path)?;
                tracing::debug!("Removed processed WAL: {:?}", path);
                count += 1;
            }
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} processed WAL files", count);
    }

    Ok(count)
}
