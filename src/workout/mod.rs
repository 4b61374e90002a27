//! Calorie estimation from a workout log.
//!
//! A workout log records minutes spent per muscle group (each capped at
//! 60) and an overall intensity. Calories burned are the total minutes
//! times a per-intensity rate.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Daily calorie goal used when none is configured.
pub const DEFAULT_CALORIE_GOAL: f64 = 1000.0;

/// Upper bound on minutes logged for one muscle group.
pub const MAX_MINUTES_PER_GROUP: u32 = 60;

/// Workout intensity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

impl Intensity {
    /// Calories burned per minute at this intensity.
    pub fn calories_per_minute(&self) -> f64 {
        match self {
            Intensity::Low => 5.0,
            Intensity::Medium => 7.0,
            Intensity::High => 10.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }
}

/// Muscle groups a workout can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Arms,
    Chest,
    Back,
    Legs,
    Core,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 5] = [
        MuscleGroup::Arms,
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Legs,
        MuscleGroup::Core,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Core => "Core",
        }
    }

    fn index(&self) -> usize {
        match self {
            MuscleGroup::Arms => 0,
            MuscleGroup::Chest => 1,
            MuscleGroup::Back => 2,
            MuscleGroup::Legs => 3,
            MuscleGroup::Core => 4,
        }
    }
}

/// Minutes per muscle group plus intensity for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutLog {
    minutes: [u32; 5],
    pub intensity: Intensity,
}

impl WorkoutLog {
    pub fn new(intensity: Intensity) -> Self {
        Self {
            minutes: [0; 5],
            intensity,
        }
    }

    /// Sets the minutes for `group`, capped at [`MAX_MINUTES_PER_GROUP`].
    pub fn set_minutes(&mut self, group: MuscleGroup, minutes: u32) {
        self.minutes[group.index()] = minutes.min(MAX_MINUTES_PER_GROUP);
    }

    /// Builder form of [`WorkoutLog::set_minutes`].
    #[must_use]
    pub fn with_minutes(mut self, group: MuscleGroup, minutes: u32) -> Self {
        self.set_minutes(group, minutes);
        self
    }

    pub fn minutes(&self, group: MuscleGroup) -> u32 {
        self.minutes[group.index()]
    }

    pub fn total_minutes(&self) -> u32 {
        self.minutes.iter().sum()
    }

    pub fn calories_burned(&self) -> f64 {
        f64::from(self.total_minutes()) * self.intensity.calories_per_minute()
    }

    /// Fraction of `goal` burned, capped at 1.0.
    pub fn progress_toward(&self, goal: f64) -> f64 {
        if goal <= 0.0 {
            return 0.0;
        }
        (self.calories_burned() / goal).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_rates() {
        assert_eq!(Intensity::Low.calories_per_minute(), 5.0);
        assert_eq!(Intensity::Medium.calories_per_minute(), 7.0);
        assert_eq!(Intensity::High.calories_per_minute(), 10.0);
        assert_eq!(Intensity::default(), Intensity::Medium);
    }

    #[test]
    fn test_empty_log_burns_nothing() {
        let log = WorkoutLog::default();
        assert_eq!(log.total_minutes(), 0);
        assert_eq!(log.calories_burned(), 0.0);
        assert_eq!(log.progress_toward(DEFAULT_CALORIE_GOAL), 0.0);
    }

    #[test]
    fn test_calories_per_intensity() {
        let base = WorkoutLog::default()
            .with_minutes(MuscleGroup::Arms, 10)
            .with_minutes(MuscleGroup::Legs, 20);

        let cases = [
            (Intensity::Low, 150.0),
            (Intensity::Medium, 210.0),
            (Intensity::High, 300.0),
        ];
        for (intensity, expected) in cases {
            let log = WorkoutLog {
                intensity,
                ..base.clone()
            };
            assert_eq!(log.calories_burned(), expected, "{:?}", intensity);
        }
    }

    #[test]
    fn test_minutes_capped_per_group() {
        let log = WorkoutLog::new(Intensity::High).with_minutes(MuscleGroup::Core, 90);
        assert_eq!(log.minutes(MuscleGroup::Core), MAX_MINUTES_PER_GROUP);
    }

    #[test]
    fn test_progress_capped_at_goal() {
        let mut log = WorkoutLog::new(Intensity::High);
        for group in MuscleGroup::ALL {
            log.set_minutes(group, 60);
        }
        assert_eq!(log.total_minutes(), 300);
        assert_eq!(log.calories_burned(), 3000.0);
        assert_eq!(log.progress_toward(DEFAULT_CALORIE_GOAL), 1.0);
    }

    #[test]
    fn test_progress_partial() {
        let log = WorkoutLog::new(Intensity::Low).with_minutes(MuscleGroup::Chest, 50);
        assert_eq!(log.progress_toward(1000.0), 0.25);
    }
}
