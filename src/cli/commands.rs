//! Command definitions for the traumafit CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use crate::journal::Mood;
use crate::stats::{BodyType, StatsUpdate};
use crate::workout::{Intensity, MuscleGroup, WorkoutLog};

// ============================================================================
// CLI Structure
// ============================================================================

/// traumafit - countdown timer, step tracking and workout records
#[derive(Parser, Debug)]
#[command(
    name = "traumafit",
    version,
    about = "Fitness companion for the terminal",
    long_about = "Countdown timer with an alarm, daily step tracking, calorie estimates,\n\
                  and a local journal, reminder list and stats sheet.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run a countdown timer in the foreground
    Timer(TimerArgs),

    /// Show today's step count, refreshing periodically
    Steps(StepsArgs),

    /// Estimate calories burned from a workout
    Calories(CaloriesArgs),

    /// Write, list and delete journal entries
    Journal {
        #[command(subcommand)]
        action: JournalCommand,
    },

    /// Manage workout reminders
    Reminder {
        #[command(subcommand)]
        action: ReminderCommand,
    },

    /// Show or update body stats and personal records
    Stats {
        #[command(subcommand)]
        action: Option<StatsCommand>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Timer Arguments
// ============================================================================

/// Arguments for the timer command
#[derive(Args, Debug, Clone, Default)]
pub struct TimerArgs {
    /// Hours (0-23)
    #[arg(
        short = 'H',
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..=23)
    )]
    pub hours: u32,

    /// Minutes (0-59)
    #[arg(
        short,
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..=59)
    )]
    pub minutes: u32,

    /// Seconds (0-59)
    #[arg(
        short,
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(0..=59)
    )]
    pub seconds: u32,

    /// Disable the alarm sound
    #[arg(long)]
    pub no_sound: bool,
}

// ============================================================================
// Steps Arguments
// ============================================================================

/// Arguments for the steps command
#[derive(Args, Debug, Clone)]
pub struct StepsArgs {
    /// File holding today's step count (a number or {"steps": n})
    #[arg(long, value_name = "PATH")]
    pub source: PathBuf,

    /// Refresh once and exit
    #[arg(long)]
    pub once: bool,
}

// ============================================================================
// Calories Arguments
// ============================================================================

/// Arguments for the calories command
#[derive(Args, Debug, Clone, Default)]
pub struct CaloriesArgs {
    /// Minutes spent on arms (0-60)
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u32).range(0..=60))]
    pub arms: u32,

    /// Minutes spent on chest (0-60)
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u32).range(0..=60))]
    pub chest: u32,

    /// Minutes spent on back (0-60)
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u32).range(0..=60))]
    pub back: u32,

    /// Minutes spent on legs (0-60)
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u32).range(0..=60))]
    pub legs: u32,

    /// Minutes spent on core (0-60)
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u32).range(0..=60))]
    pub core: u32,

    /// Workout intensity
    #[arg(short, long, value_enum, default_value_t = Intensity::Medium)]
    pub intensity: Intensity,
}

impl CaloriesArgs {
    /// Builds the workout log described by these arguments.
    pub fn to_log(&self) -> WorkoutLog {
        WorkoutLog::new(self.intensity)
            .with_minutes(MuscleGroup::Arms, self.arms)
            .with_minutes(MuscleGroup::Chest, self.chest)
            .with_minutes(MuscleGroup::Back, self.back)
            .with_minutes(MuscleGroup::Legs, self.legs)
            .with_minutes(MuscleGroup::Core, self.core)
    }
}

// ============================================================================
// Journal / Reminder / Stats Subcommands
// ============================================================================

#[derive(Subcommand, Debug, Clone)]
pub enum JournalCommand {
    /// Add an entry
    Add {
        /// Entry text
        text: String,

        /// Mood for the entry
        #[arg(short, long, value_enum, default_value_t = Mood::Neutral)]
        mood: Mood,
    },

    /// List entries, newest first
    List,

    /// Delete an entry by id
    Delete {
        /// Entry id
        id: Uuid,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ReminderCommand {
    /// Add a reminder
    Add {
        /// When to remind: RFC 3339 or "YYYY-MM-DD HH:MM" local time
        #[arg(value_parser = parse_reminder_time)]
        at: DateTime<Utc>,
    },

    /// List reminders
    List,

    /// Delete a reminder by id
    Delete {
        /// Reminder id
        id: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum StatsCommand {
    /// Show stored stats
    Show,

    /// Update one or more fields
    Set(StatsSetArgs),
}

/// Arguments for `stats set`
#[derive(Args, Debug, Clone, Default)]
pub struct StatsSetArgs {
    #[arg(long)]
    pub weight: Option<String>,

    #[arg(long)]
    pub height: Option<String>,

    #[arg(long, value_enum)]
    pub body_type: Option<BodyType>,

    /// Chest personal record
    #[arg(long)]
    pub chest: Option<String>,

    /// Arms personal record
    #[arg(long)]
    pub arms: Option<String>,

    /// Back personal record
    #[arg(long)]
    pub back: Option<String>,

    /// Legs personal record
    #[arg(long)]
    pub legs: Option<String>,

    /// Core personal record
    #[arg(long)]
    pub core: Option<String>,

    /// Longest run in miles
    #[arg(long)]
    pub miles_ran: Option<String>,
}

impl From<StatsSetArgs> for StatsUpdate {
    fn from(args: StatsSetArgs) -> Self {
        Self {
            weight: args.weight,
            height: args.height,
            body_type: args.body_type,
            pr_chest: args.chest,
            pr_arms: args.arms,
            pr_back: args.back,
            pr_legs: args.legs,
            pr_core: args.core,
            pr_miles_ran: args.miles_ran,
        }
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Parses a reminder time.
///
/// Accepts RFC 3339 (`2024-05-01T18:30:00Z`) or `YYYY-MM-DD HH:MM` in
/// local time.
fn parse_reminder_time(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .map_err(|_| format!("invalid time '{}', expected RFC 3339 or YYYY-MM-DD HH:MM", s))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("'{}' does not exist in the local time zone", s))
}

// ============================================================================
// Tests
// ============================================================================
