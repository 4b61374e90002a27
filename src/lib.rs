//! traumafit library
//!
//! This library provides the core functionality for the traumafit CLI.
//! It includes:
//! - Countdown timer state machine driven by an injectable clock
//! - Expiry alarm playback
//! - Daily step tracking with a rolling 7-sample history
//! - Calorie estimates from a workout log
//! - Journal, reminder and stats records over a key-value store
//! - Configuration loading
//! - CLI command parsing and display utilities

pub mod cli;
pub mod config;
pub mod journal;
pub mod reminder;
pub mod sound;
pub mod stats;
pub mod steps;
pub mod store;
pub mod timer;
pub mod types;
pub mod workout;

// Re-export commonly used types for convenience
pub use types::{TimerConfig, TimerPhase, TimerSnapshot, TimerState, EXPIRED_MESSAGE};

pub use timer::{
    ClockSource, ExpiryNotifier, IntervalClock, ManualClock, MockExpiryNotifier, SoundNotifier,
    SubscriptionId, TimerController, TimerEvent, TICK_PERIOD,
};

pub use sound::{create_player, MockSoundPlayer, SilentSoundPlayer, SoundError, SoundPlayer, SoundSource};

pub use steps::{
    FileStepSource, MockStepSource, StepHistory, StepPoller, StepSource, StepSourceError,
    StepTracker, HISTORY_CAPACITY,
};

pub use workout::{Intensity, MuscleGroup, WorkoutLog};

pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};

pub use journal::{Journal, JournalEntry, Mood};
pub use reminder::{ReminderError, ReminderItem, Reminders};
pub use stats::{BodyType, StatsUpdate, UserStats};

pub use config::{AppConfig, ConfigError};
