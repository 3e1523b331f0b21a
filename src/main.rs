//! Main entry point for the `habit-report` CLI
//!
//! Loads a snapshot of one user's habits and completions, evaluates it at a
//! pinned instant and prints either the dashboard or a single habit's detail.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::info;

use habit_period_engine::report::{render_completion_history, render_dashboard, render_habit_detail};
use habit_period_engine::{
    DashboardQuery, EngineConfig, HabitId, HabitStore, HabitTracker, PeriodType, Snapshot, UserId,
};

/// Default snapshot location: `<data dir>/habit_tracker/snapshot.json`
fn get_default_snapshot_path() -> Option<PathBuf> {
    dirs::data_dir().map(|mut p| {
        p.push("habit_tracker");
        p.push("snapshot.json");
        p
    })
}

/// How much completion history the detail view lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryWindow {
    Days(u32),
    All,
}

impl HistoryWindow {
    fn cutoff_days(self) -> Option<u32> {
        match self {
            HistoryWindow::Days(days) => Some(days),
            HistoryWindow::All => None,
        }
    }
}

impl std::str::FromStr for HistoryWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(HistoryWindow::All),
            days => days
                .parse::<u32>()
                .map(HistoryWindow::Days)
                .map_err(|_| format!("expected a number of days or \"all\", got '{}'", s)),
        }
    }
}

/// Command line arguments for the habit report
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON snapshot ({ "habits": [...], "completions": [...] })
    /// If not provided, uses a default location in the user's data directory
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// IANA time zone for day boundaries, e.g. "Europe/Berlin"
    #[arg(long)]
    timezone: Option<String>,

    /// Dashboard window in days
    #[arg(long)]
    range_days: Option<u32>,

    /// Only list habits of this period type
    #[arg(long)]
    period: Option<PeriodType>,

    /// Only list habits whose name contains this text
    #[arg(long)]
    search: Option<String>,

    /// Show the detail view of one habit instead of the dashboard
    #[arg(long)]
    habit: Option<String>,

    /// With --habit, also list completions of the last N days ("all" for everything)
    #[arg(long, requires = "habit")]
    history_days: Option<HistoryWindow>,

    /// Evaluate at this RFC 3339 instant instead of the current time
    #[arg(long)]
    now: Option<String>,

    /// Print the JSON schema of the snapshot file and exit
    #[arg(long)]
    print_schema: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_period_engine={}", log_level))
        .with_writer(std::io::stderr) // Keep stdout for the report
        .init();

    if args.print_schema {
        println!("{}", Snapshot::json_schema()?);
        return Ok(());
    }

    let mut config = EngineConfig::load_or_default(args.config.as_deref())?;
    if let Some(timezone) = args.timezone {
        config.timezone = timezone;
    }
    if let Some(range_days) = args.range_days {
        config.range_days = range_days;
    }
    config.validate()?;

    let now = match args.now {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)?.timestamp_millis(),
        None => Utc::now().timestamp_millis(),
    };

    let snapshot_path = args
        .snapshot
        .or_else(get_default_snapshot_path)
        .ok_or("Could not determine a snapshot path, pass --snapshot")?;
    info!("Using snapshot at: {}", snapshot_path.display());

    let store = Snapshot::load(&snapshot_path)?.into_store(UserId::from("local"));
    let tracker = HabitTracker::new(store, config.calendar()?);

    let output = match args.habit {
        Some(id) => {
            let habit_id = HabitId::from(id.as_str());
            let habit = tracker.store().get_habit(&habit_id)?;
            let stats = tracker.habit_stats(&habit_id, now)?;
            let mut output = render_habit_detail(tracker.engine_at(now).clock(), &habit, &stats);
            if let Some(window) = args.history_days {
                let groups = tracker.completion_history(&habit_id, now, window.cutoff_days())?;
                output.push('\n');
                output.push_str(&render_completion_history(&groups, habit.period_type));
            }
            output
        }
        None => {
            let query = DashboardQuery {
                range_days: config.range_days,
                period_type: args.period,
                search: args.search,
            };
            render_dashboard(&tracker.dashboard(now, &query)?)
        }
    };

    print!("{}", output);
    Ok(())
}
