//! CLI module for traumafit.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;

pub use commands::{
    CaloriesArgs, Cli, Commands, JournalCommand, ReminderCommand, StatsCommand, StatsSetArgs,
    StepsArgs, TimerArgs,
};
pub use display::Display;
