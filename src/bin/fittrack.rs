//! fittrack CLI - Command-line interface for fittrack-core
//!
//! Commands:
//! - parse: Parse workout text and preview the annotated records
//! - log: Parse workout text and append the records to a store file
//! - dashboard: Compute the dashboard summary from a store file
//! - workouts: List a day's workouts with their calorie total

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use fittrack_core::pipeline::WorkoutTracker;
use fittrack_core::store::MemoryStore;
use fittrack_core::types::UserId;
use fittrack_core::{estimator, CoreError, WorkoutParser, CORE_VERSION};

/// fittrack - workout parsing and calorie aggregation engine
#[derive(Parser)]
#[command(name = "fittrack")]
#[command(version = CORE_VERSION)]
#[command(about = "Parse workout shorthand and aggregate calorie statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse workout text and preview the annotated records
    Parse {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Owner recorded on the previewed records
        #[arg(long, default_value = "local")]
        user: String,

        /// Record date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Output format (defaults to table on a TTY, json otherwise)
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Parse workout text and append the records to a store file
    Log {
        /// Store file path (created if absent)
        #[arg(short, long)]
        store: PathBuf,

        /// Owner of the logged workouts
        #[arg(long)]
        user: String,

        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Record date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Output format
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Compute the dashboard summary from a store file
    Dashboard {
        /// Store file path
        #[arg(short, long)]
        store: PathBuf,

        /// User to summarize
        #[arg(long)]
        user: String,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Output format
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// List a day's workouts with their calorie total
    Workouts {
        /// Store file path
        #[arg(short, long)]
        store: PathBuf,

        /// User to query
        #[arg(long)]
        user: String,

        /// Day to list (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Output format
        #[arg(long)]
        format: Option<OutputFormat>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Human-readable table
    Table,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), FittrackCliError> {
    match cli.command {
        Commands::Parse {
            input,
            user,
            date,
            format,
        } => cmd_parse(&input, &user, date.as_deref(), pick_format(format)),

        Commands::Log {
            store,
            user,
            input,
            date,
            format,
        } => cmd_log(&store, &user, &input, date.as_deref(), pick_format(format)),

        Commands::Dashboard {
            store,
            user,
            date,
            format,
        } => cmd_dashboard(&store, &user, date.as_deref(), pick_format(format)),

        Commands::Workouts {
            store,
            user,
            date,
            format,
        } => cmd_workouts(&store, &user, date.as_deref(), pick_format(format)),
    }
}

fn cmd_parse(
    input: &Path,
    user: &str,
    date: Option<&str>,
    format: OutputFormat,
) -> Result<(), FittrackCliError> {
    let text = read_input(input)?;
    let date = parse_date(date)?;
    let owner = UserId::new(user);

    let drafts = WorkoutParser::new().parse(&text)?;
    let records: Vec<_> = drafts
        .into_iter()
        .map(|d| estimator::annotate(d, owner.clone(), date))
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&records)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Table => {
            for r in &records {
                println!(
                    "{:<12} {:<24} {:>2} x {:>3}  {:>7.1} kg  {:>6.1} min  {:>8.1} cal",
                    r.category, r.name, r.sets, r.reps, r.weight, r.duration, r.calories_burned
                );
            }
        }
    }

    Ok(())
}

fn cmd_log(
    store_path: &Path,
    user: &str,
    input: &Path,
    date: Option<&str>,
    format: OutputFormat,
) -> Result<(), FittrackCliError> {
    let text = read_input(input)?;
    let date = parse_date(date)?;
    let owner = UserId::new(user);

    let mut tracker = load_tracker(store_path)?;
    let saved = tracker.log_workouts_at(&owner, &text, date)?;

    fs::write(store_path, tracker.save_state()?)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&saved)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(&saved)?),
        OutputFormat::Table => {
            println!("Logged {} workout(s) for {}", saved.len(), owner);
            for r in &saved {
                println!("  {} / {} ({:.1} cal)", r.category, r.name, r.calories_burned);
            }
        }
    }

    Ok(())
}

fn cmd_dashboard(
    store_path: &Path,
    user: &str,
    date: Option<&str>,
    format: OutputFormat,
) -> Result<(), FittrackCliError> {
    let tracker = load_tracker(store_path)?;
    let reference = parse_date(date)?;
    let dashboard = tracker.dashboard(&UserId::new(user), reference)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&dashboard)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(&dashboard)?),
        OutputFormat::Table => {
            println!("Dashboard for {}", user);
            println!("================");
            println!("Calories burnt today: {:.1}", dashboard.total_calories_burnt);
            println!("Workouts today:       {}", dashboard.total_workouts);
            println!(
                "Average per workout:  {:.1}",
                dashboard.avg_calories_burnt_per_workout
            );

            println!("\nLast 7 days:");
            let weekly = &dashboard.total_weeks_calories_burnt;
            for (label, calories) in weekly.weeks.iter().zip(&weekly.calories_burned) {
                println!("  {:>4}  {:>8.1}", label, calories);
            }

            if !dashboard.pie_chart_data.is_empty() {
                println!("\nBy category:");
                for slice in &dashboard.pie_chart_data {
                    println!("  {:<12} {:>8.1}", slice.label, slice.value);
                }
            }
        }
    }

    Ok(())
}

fn cmd_workouts(
    store_path: &Path,
    user: &str,
    date: Option<&str>,
    format: OutputFormat,
) -> Result<(), FittrackCliError> {
    let tracker = load_tracker(store_path)?;
    let date = match date {
        Some(_) => Some(parse_date(date)?),
        None => None,
    };
    let today = tracker.workouts_for_date(&UserId::new(user), date)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&today)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(&today)?),
        OutputFormat::Table => {
            for r in &today.todays_workouts {
                println!(
                    "{:<12} {:<24} {:>2} x {:>3}  {:>8.1} cal",
                    r.category, r.name, r.sets, r.reps, r.calories_burned
                );
            }
            println!("Total: {:.1} cal", today.total_calories_burnt);
        }
    }

    Ok(())
}

// Helper functions

fn pick_format(format: Option<OutputFormat>) -> OutputFormat {
    format.unwrap_or_else(|| {
        if atty::is(atty::Stream::Stdout) {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    })
}

fn read_input(input: &Path) -> Result<String, FittrackCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn parse_date(date: Option<&str>) -> Result<DateTime<Utc>, FittrackCliError> {
    match date {
        None => Ok(Utc::now()),
        Some(s) => {
            let day = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| FittrackCliError::BadDate(s.to_string()))?;
            Ok(day.and_time(NaiveTime::MIN).and_utc())
        }
    }
}

fn load_tracker(store_path: &Path) -> Result<WorkoutTracker<MemoryStore>, FittrackCliError> {
    if store_path.exists() {
        let json = fs::read_to_string(store_path)?;
        Ok(WorkoutTracker::load_state(&json)?)
    } else {
        Ok(WorkoutTracker::in_memory())
    }
}

// Error types

#[derive(Debug)]
enum FittrackCliError {
    Io(io::Error),
    Core(CoreError),
    Json(serde_json::Error),
    BadDate(String),
}

impl From<io::Error> for FittrackCliError {
    fn from(e: io::Error) -> Self {
        FittrackCliError::Io(e)
    }
}

impl From<CoreError> for FittrackCliError {
    fn from(e: CoreError) -> Self {
        FittrackCliError::Core(e)
    }
}

impl From<serde_json::Error> for FittrackCliError {
    fn from(e: serde_json::Error) -> Self {
        FittrackCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<FittrackCliError> for CliError {
    fn from(e: FittrackCliError) -> Self {
        match e {
            FittrackCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            FittrackCliError::Core(CoreError::MalformedInput(msg)) => CliError {
                code: "MALFORMED_INPUT".to_string(),
                message: msg,
                hint: Some(
                    "Expected: #Category, -Name, -N sets X M reps, -W kg, -D min".to_string(),
                ),
            },
            FittrackCliError::Core(CoreError::NotFound(msg)) => CliError {
                code: "NOT_FOUND".to_string(),
                message: msg,
                hint: None,
            },
            FittrackCliError::Core(CoreError::Unauthorized(msg)) => CliError {
                code: "UNAUTHORIZED".to_string(),
                message: msg,
                hint: None,
            },
            FittrackCliError::Core(CoreError::StoreFailure(msg)) => CliError {
                code: "STORE_FAILURE".to_string(),
                message: msg,
                hint: Some("Check the store file is valid JSON".to_string()),
            },
            FittrackCliError::Core(CoreError::Config(msg)) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: msg,
                hint: None,
            },
            FittrackCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            FittrackCliError::BadDate(s) => CliError {
                code: "BAD_DATE".to_string(),
                message: format!("cannot parse date \"{s}\""),
                hint: Some("Use YYYY-MM-DD".to_string()),
            },
        }
    }
}
