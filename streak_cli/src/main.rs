use chrono::{NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use streak_core::*;

#[derive(Parser)]
#[command(name = "streaks")]
#[command(about = "Workout streak tracking system", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a workout and recompute streaks
    Log {
        /// Activity label (run, gym, swim, ...)
        #[arg(long, default_value = "workout")]
        activity: String,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<u32>,

        /// Calories burned
        #[arg(long)]
        calories: Option<u32>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,

        /// Backfill date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show current streak status (default)
    Status,

    /// List milestone badges and their unlock state
    Badges,

    /// Roll up WAL workouts to CSV
    Rollup {
        /// Clean up processed WAL files after rollup
        #[arg(long)]
        cleanup: bool,
    },
}

/// Filesystem layout under the data directory
struct Paths {
    wal: PathBuf,
    state: PathBuf,
    csv: PathBuf,
}

impl Paths {
    fn new(data_dir: &Path) -> Self {
        let wal_dir = data_dir.join("wal");
        Self {
            wal: wal_dir.join("workouts.wal"),
            state: wal_dir.join("streaks.json"),
            csv: data_dir.join("workouts.csv"),
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    streak_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Some(Commands::Log {
            activity,
            duration,
            calories,
            notes,
            date,
        }) => cmd_log(data_dir, activity, duration, calories, notes, date, &config),
        Some(Commands::Status) => cmd_status(data_dir, &config),
        Some(Commands::Badges) => cmd_badges(data_dir, &config),
        Some(Commands::Rollup { cleanup }) => cmd_rollup(data_dir, cleanup),
        None => {
            // Default to "status" command
            cmd_status(data_dir, &config)
        }
    }
}

/// Reload the full history, recompute streak state against the persisted
/// previous value, and save the result.
///
/// This runs after every workout mutation and on every status read; the
/// current streak depends on today's date, so display also recomputes.
fn recompute_and_save(paths: &Paths) -> Result<(StreakData, Vec<MilestoneBadge>)> {
    let workouts = load_workouts(&paths.wal, &paths.csv)?;
    let previous = StreakData::load(&paths.state)?;
    let today = Utc::now().date_naive();

    let (data, newly_unlocked) = compute_streak_data(&workouts, &previous, today);
    data.save(&paths.state)?;

    Ok((data, newly_unlocked))
}

fn cmd_log(
    data_dir: PathBuf,
    activity: String,
    duration: Option<u32>,
    calories: Option<u32>,
    notes: Option<String>,
    date: Option<NaiveDate>,
    config: &Config,
) -> Result<()> {
    std::fs::create_dir_all(data_dir.join("wal"))?;
    let paths = Paths::new(&data_dir);

    let catalog = streak_core::catalog::get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let performed_at = match date {
        Some(day) => day.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    };

    let workout = WorkoutRecord {
        id: uuid::Uuid::new_v4(),
        performed_at,
        activity,
        duration_minutes: duration,
        calories,
        notes,
    };

    let mut sink = JsonlSink::new(&paths.wal);
    sink.append(&workout)?;

    let (data, newly_unlocked) = recompute_and_save(&paths)?;

    println!("\n✓ Workout logged!");
    println!("  Current streak: {} day(s)", data.current_streak);
    println!("  {}", data.message());

    // Announce any badges this workout earned, then clear the notices
    let mut notices = UnlockNotices::new();
    notices.post(newly_unlocked);
    for badge in notices.active() {
        if config.display.use_emoji {
            println!("\n  {} Milestone unlocked: {}!", badge.emoji, badge.name);
        } else {
            println!("\n  Milestone unlocked: {}!", badge.name);
        }
        println!("    {}", badge.description);
    }
    notices.clear();

    Ok(())
}

fn cmd_status(data_dir: PathBuf, config: &Config) -> Result<()> {
    let paths = Paths::new(&data_dir);

    let (data, _) = recompute_and_save(&paths)?;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  WORKOUT STREAK");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Current streak: {} day(s)", data.current_streak);
    println!("  Longest streak: {} day(s)", data.longest_streak);

    match data.last_workout_date {
        Some(day) => println!("  Last workout:   {}", day),
        None => println!("  Last workout:   never"),
    }

    println!();
    println!("  {}", data.message());

    if let Some(next) = data.next_milestone() {
        let label = if config.display.use_emoji {
            format!("{} {}", next.emoji, next.name)
        } else {
            next.name.clone()
        };
        println!(
            "  Next milestone: {} ({} day(s) to go)",
            label,
            data.days_until_next_milestone()
        );
    } else {
        println!("  All milestones unlocked!");
    }

    println!();
    Ok(())
}

fn cmd_badges(data_dir: PathBuf, config: &Config) -> Result<()> {
    let paths = Paths::new(&data_dir);

    let (data, _) = recompute_and_save(&paths)?;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  MILESTONE BADGES");
    println!("╰─────────────────────────────────────────╯");
    println!();

    for badge in &data.milestone_badges {
        let marker = if badge.unlocked { "✓" } else { " " };
        let label = if config.display.use_emoji {
            format!("{} {}", badge.emoji, badge.name)
        } else {
            badge.name.clone()
        };

        match badge.unlocked_date {
            Some(day) => println!(
                "  [{}] {} ({} days) - unlocked {}",
                marker, label, badge.threshold, day
            ),
            None => println!("  [{}] {} ({} days)", marker, label, badge.threshold),
        }
    }

    println!();
    Ok(())
}

fn cmd_rollup(data_dir: PathBuf, cleanup: bool) -> Result<()> {
    let wal_dir = data_dir.join("wal");
    let paths = Paths::new(&data_dir);

    if !paths.wal.exists() {
        println!("No WAL file found - nothing to roll up.");
        return Ok(());
    }

    let count = streak_core::csv_rollup::wal_to_csv_and_archive(&paths.wal, &paths.csv)?;

    println!("✓ Rolled up {} workout(s) to CSV", count);
    println!("  CSV: {}", paths.csv.display());

    if cleanup {
        let cleaned = streak_core::csv_rollup::cleanup_processed_wals(&wal_dir)?;
        if cleaned > 0 {
            println!("✓ Cleaned up {} processed WAL files", cleaned);
        }
    }

    Ok(())
}
