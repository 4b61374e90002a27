//! Core data types for the countdown timer.
//!
//! This module defines the data structures used for:
//! - Timer phase and state management
//! - Timer configuration (hours/minutes/seconds) with validation
//! - Read-only snapshots handed to observers

use serde::{Deserialize, Serialize};

/// Display text shown once a countdown has run out.
pub const EXPIRED_MESSAGE: &str = "Time's up!";

// ============================================================================
// TimerPhase
// ============================================================================

/// Represents the current phase of the timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// No countdown configured
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Countdown reached zero
    Expired,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Expired => "expired",
        }
    }

    /// Returns true if the timer is actively counting down.
    pub fn is_active(&self) -> bool {
        matches!(self, TimerPhase::Running)
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Duration requested for one countdown run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Hours (0-23)
    pub hours: u32,
    /// Minutes (0-59)
    pub minutes: u32,
    /// Seconds (0-59)
    pub seconds: u32,
}

impl TimerConfig {
    /// Creates a configuration from its three picker fields.
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Total duration in seconds, saturating at `u32::MAX`.
    ///
    /// Fields outside the picker ranges are not rejected here.
    pub fn duration_seconds(&self) -> u32 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds)
    }

    /// Validates the configuration against the picker ranges.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.hours > 23 {
            return Err("hours must be between 0 and 23".to_string());
        }
        if self.minutes > 59 {
            return Err("minutes must be between 0 and 59".to_string());
        }
        if self.seconds > 59 {
            return Err("seconds must be between 0 and 59".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Represents the current state of the timer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Current phase of the timer
    pub phase: TimerPhase,
    /// Remaining seconds in the current run
    pub remaining_seconds: u32,
    /// Duration of the current run, fixed at start
    pub total_seconds: u32,
}

impl TimerState {
    /// Creates a new TimerState in idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a fresh run of `duration_seconds`.
    pub fn start(&mut self, duration_seconds: u32) {
        self.phase = TimerPhase::Running;
        self.total_seconds = duration_seconds;
        self.remaining_seconds = duration_seconds;
    }

    /// Stops the timer and resets to initial state.
    pub fn stop(&mut self) {
        self.phase = TimerPhase::Idle;
        self.remaining_seconds = 0;
        self.total_seconds = 0;
    }

    /// Decrements the timer by one second.
    ///
    /// Returns true if the timer has completed (reached 0). Completion
    /// moves the phase to `Expired`.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = TimerPhase::Expired;
            return true;
        }
        false
    }

    /// Returns true if the timer is actively running.
    pub fn is_running(&self) -> bool {
        self.phase.is_active()
    }

    /// Returns true once the countdown has run out.
    pub fn is_expired(&self) -> bool {
        self.phase == TimerPhase::Expired
    }

    /// Remaining time as a fraction of the run's total, in `[0.0, 1.0]`.
    pub fn progress_fraction(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        (f64::from(self.remaining_seconds) / f64::from(self.total_seconds)).clamp(0.0, 1.0)
    }

    /// Remaining time as `HHh MMm SSs`, or [`EXPIRED_MESSAGE`] once expired.
    pub fn display_string(&self) -> String {
        if self.is_expired() {
            return EXPIRED_MESSAGE.to_string();
        }
        format_hms(self.remaining_seconds)
    }

    /// Captures the observable view of this state.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            total_seconds: self.total_seconds,
            progress: self.progress_fraction(),
            display: self.display_string(),
        }
    }
}

/// Formats seconds as zero-padded `HHh MMm SSs`.
pub fn format_hms(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}h {:02}m {:02}s", hours, minutes, seconds)
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Read-only view of the timer handed to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    #[serde(rename = "remainingSeconds")]
    pub remaining_seconds: u32,
    #[serde(rename = "totalSeconds")]
    pub total_seconds: u32,
    pub progress: f64,
    pub display: String,
}

// ============================================================================
// Tests
// ============================================================================
