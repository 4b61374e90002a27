//! Daily step tracking.
//!
//! This module provides:
//! - `history`: the 7-entry rolling step history
//! - `source`: step count providers (file, mock)
//! - `StepTracker`: current count, goal progress and last error
//! - `StepPoller`: periodic refresh loop
//!
//! A refresh has three outcomes. A count replaces the displayed value
//! and is appended to the history. "No data" zeroes the displayed value
//! and leaves the history alone. A failed query keeps the previous value.
//! The last two set a user-facing message.

pub mod error;
pub mod history;
pub mod source;

pub use error::StepSourceError;
pub use history::{StepHistory, HISTORY_CAPACITY};
pub use source::{parse_step_count, FileStepSource, MockStepSource, StepSource};

use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, warn};

/// Daily step goal used when none is configured.
pub const DEFAULT_STEP_GOAL: f64 = 10_000.0;

/// Default interval between step refreshes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Message shown when the source has no samples for today.
pub const NO_DATA_MESSAGE: &str = "No steps data available for today.";

/// Message shown when the source query fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch step count.";

// ============================================================================
// StepTracker
// ============================================================================

/// Today's step count with its goal and history.
#[derive(Debug, Clone, PartialEq)]
pub struct StepTracker {
    daily_steps: f64,
    goal: f64,
    history: StepHistory,
    error_message: Option<String>,
}

impl Default for StepTracker {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_GOAL)
    }
}

impl StepTracker {
    /// Creates a tracker with an empty history.
    pub fn new(goal: f64) -> Self {
        Self {
            daily_steps: 0.0,
            goal,
            history: StepHistory::default(),
            error_message: None,
        }
    }

    /// Queries `source` once and applies the answer.
    pub async fn refresh<S: StepSource>(&mut self, source: &S) {
        let result = source.steps_since_midnight().await;
        self.apply(result);
    }

    /// Applies one query result.
    pub fn apply(&mut self, result: Result<f64, StepSourceError>) {
        match result {
            Ok(steps) => {
                debug!("Step count updated: {}", steps);
                self.daily_steps = steps;
                self.error_message = None;
                self.history.push(steps);
            }
            Err(StepSourceError::NoData) => {
                debug!("No step data for today");
                self.daily_steps = 0.0;
                self.error_message = Some(NO_DATA_MESSAGE.to_string());
            }
            Err(e) => {
                warn!("Failed to fetch steps: {}", e);
                self.error_message = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
    }

    pub fn daily_steps(&self) -> f64 {
        self.daily_steps
    }

    pub fn goal(&self) -> f64 {
        self.goal
    }

    /// Fraction of the goal reached, capped at 1.0.
    pub fn progress_fraction(&self) -> f64 {
        if self.goal <= 0.0 {
            return 0.0;
        }
        (self.daily_steps / self.goal).clamp(0.0, 1.0)
    }

    pub fn history(&self) -> &StepHistory {
        &self.history
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

// ============================================================================
// StepPoller
// ============================================================================

/// Refreshes a [`StepTracker`] on a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPoller {
    interval: Duration,
}

impl Default for StepPoller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl StepPoller {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Polls forever, calling `on_update` after each refresh.
    ///
    /// The first refresh happens immediately. A refresh that overruns
    /// delays the next one instead of bunching ticks together, so polls
    /// stay at least `interval` apart.
    pub async fn run<S, F>(&self, tracker: &mut StepTracker, source: &S, mut on_update: F)
    where
        S: StepSource,
        F: FnMut(&StepTracker),
    {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            tracker.refresh(source).await;
            on_update(tracker);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
