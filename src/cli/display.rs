//! Display utilities for the traumafit CLI.
//!
//! This module provides formatted output for:
//! - The live timer line and expiry message
//! - Step and calorie progress
//! - Journal, reminder and stats listings
//! - Error messages
//!
//! Every `show_*` function prints the text built by a matching
//! `format_*` function so the formatting can be tested without
//! capturing stdout.

use std::io::{self, Write};

use chrono::{DateTime, Local, Utc};

use crate::journal::JournalEntry;
use crate::reminder::ReminderItem;
use crate::stats::UserStats;
use crate::steps::StepTracker;
use crate::types::{TimerSnapshot, EXPIRED_MESSAGE};
use crate::workout::{MuscleGroup, WorkoutLog};

/// Width of the text progress bar in cells.
pub const BAR_WIDTH: usize = 30;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    // ------------------------------------------------------------------------
    // Timer
    // ------------------------------------------------------------------------

    /// Redraws the timer line in place.
    pub fn show_timer_progress(snapshot: &TimerSnapshot) {
        let mut stdout = io::stdout();
        // Best effort: a closed stdout should not stop the countdown.
        let _ = write!(stdout, "\r{}", Self::format_timer_line(snapshot));
        let _ = stdout.flush();
    }

    pub fn show_timer_expired() {
        println!("\r{}{}", EXPIRED_MESSAGE, " ".repeat(BAR_WIDTH + 20));
    }

    pub fn show_timer_stopped(snapshot: &TimerSnapshot) {
        println!();
        println!("[] Timer stopped ({} remaining)", snapshot.display);
    }

    pub fn show_timer_zero() {
        println!("Nothing to count down: duration is zero");
    }

    fn format_timer_line(snapshot: &TimerSnapshot) -> String {
        format!(
            "{} {} {:>3}%",
            snapshot.display,
            Self::progress_bar(snapshot.progress),
            Self::percent(snapshot.progress)
        )
    }

    // ------------------------------------------------------------------------
    // Steps / Calories
    // ------------------------------------------------------------------------

    pub fn show_steps(tracker: &StepTracker) {
        println!("{}", Self::format_steps(tracker));
    }

    fn format_steps(tracker: &StepTracker) -> String {
        let mut lines = vec![format!(
            "Steps: {:.0} / {:.0} {} {}%",
            tracker.daily_steps(),
            tracker.goal(),
            Self::progress_bar(tracker.progress_fraction()),
            Self::percent(tracker.progress_fraction())
        )];

        if let Some(message) = tracker.error_message() {
            lines.push(format!("  {}", message));
        }

        let history = tracker.history();
        if !history.is_empty() {
            let samples: Vec<String> = history
                .samples()
                .iter()
                .map(|s| format!("{:.0}", s))
                .collect();
            lines.push(format!("  History: {}", samples.join(", ")));
        }

        lines.join("\n")
    }

    pub fn show_calories(log: &WorkoutLog, goal: f64) {
        println!("{}", Self::format_calories(log, goal));
    }

    fn format_calories(log: &WorkoutLog, goal: f64) -> String {
        let mut lines = Vec::new();
        for group in MuscleGroup::ALL {
            let minutes = log.minutes(group);
            if minutes > 0 {
                lines.push(format!("  {:<6} {:>2} min", group.label(), minutes));
            }
        }
        lines.push(format!(
            "Intensity: {} ({} kcal/min)",
            log.intensity.as_str(),
            log.intensity.calories_per_minute()
        ));
        lines.push(format!(
            "Calories: {:.0} / {:.0} {} {}%",
            log.calories_burned(),
            goal,
            Self::progress_bar(log.progress_toward(goal)),
            Self::percent(log.progress_toward(goal))
        ));
        lines.join("\n")
    }

    // ------------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------------

    pub fn show_journal_added(entry_id: &uuid::Uuid) {
        println!("* Journal entry saved ({})", entry_id);
    }

    pub fn show_journal_empty_text() {
        println!("Entry text is empty, nothing saved");
    }

    pub fn show_journal<'a>(entries: impl Iterator<Item = &'a JournalEntry>) {
        println!("{}", Self::format_journal(entries));
    }

    fn format_journal<'a>(entries: impl Iterator<Item = &'a JournalEntry>) -> String {
        let lines: Vec<String> = entries
            .map(|entry| {
                format!(
                    "{}  [{}]  {}\n  {}",
                    Self::format_date(&entry.date),
                    entry.mood.as_str(),
                    entry.id,
                    entry.entry
                )
            })
            .collect();
        if lines.is_empty() {
            "No journal entries".to_string()
        } else {
            lines.join("\n")
        }
    }

    pub fn show_reminder_added(id: &str, date: &DateTime<Utc>) {
        println!("* Reminder set for {} ({})", Self::format_date(date), id);
    }

    pub fn show_reminders(items: &[ReminderItem]) {
        println!("{}", Self::format_reminders(items));
    }

    fn format_reminders(items: &[ReminderItem]) -> String {
        if items.is_empty() {
            return "No reminders".to_string();
        }
        items
            .iter()
            .map(|item| format!("{}  {}", Self::format_date(&item.date), item.id))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn show_deleted(kind: &str, found: bool) {
        if found {
            println!("[] {} deleted", kind);
        } else {
            println!("{} not found", kind);
        }
    }

    pub fn show_stats(stats: &UserStats) {
        println!("{}", Self::format_stats(stats));
    }

    fn format_stats(stats: &UserStats) -> String {
        let mut lines = vec![
            "Body".to_string(),
            "─────────────────────────────".to_string(),
            format!("Weight:    {}", Self::or_dash(&stats.weight)),
            format!("Height:    {}", Self::or_dash(&stats.height)),
            format!("Body type: {}", stats.body_type.as_str()),
            String::new(),
            "Personal records".to_string(),
            "─────────────────────────────".to_string(),
        ];
        for (label, value) in stats.records() {
            lines.push(format!("{:<10} {}", format!("{}:", label), Self::or_dash(value)));
        }
        lines.join("\n")
    }

    pub fn show_stats_saved() {
        println!("* Stats saved");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Shows a hint for resolving the last error.
    pub fn show_hint(hint: &str) {
        eprintln!("  hint: {}", hint);
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    /// Renders `fraction` (clamped to 0..=1) as a bar of [`BAR_WIDTH`] cells.
    pub fn progress_bar(fraction: f64) -> String {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let filled = (fraction * BAR_WIDTH as f64).round() as usize;
        format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
    }

    fn percent(fraction: f64) -> u32 {
        if !fraction.is_finite() {
            return 0;
        }
        (fraction.clamp(0.0, 1.0) * 100.0).floor() as u32
    }

    fn format_date(date: &DateTime<Utc>) -> String {
        date.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
    }

    fn or_dash(value: &str) -> &str {
        if value.trim().is_empty() {
            "-"
        } else {
            value
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
