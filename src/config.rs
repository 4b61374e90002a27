//! Application configuration.
//!
//! Configuration is read from `<config_dir>/traumafit/config.json`, or
//! from the path given with `--config`. A missing file yields defaults,
//! and fields missing from the file take their default values.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Application directory name under the platform config/data dirs.
pub const APP_DIR_NAME: &str = "traumafit";

/// Config file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

fn default_step_goal() -> f64 {
    crate::steps::DEFAULT_STEP_GOAL
}

fn default_calorie_goal() -> f64 {
    crate::workout::DEFAULT_CALORIE_GOAL
}

fn default_step_poll_interval_secs() -> u64 {
    60
}

fn default_step_poll_tolerance_secs() -> u64 {
    10
}

fn default_sound_enabled() -> bool {
    true
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// No data directory was configured and the platform has none.
    #[error("could not determine a data directory")]
    DataDirNotFound,
}

impl ConfigError {
    /// Returns a user-facing hint for fixing the error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Read { .. } => "Check that the config file exists and is readable",
            Self::Parse { .. } => "Fix the JSON syntax in the config file",
            Self::Invalid(_) => "Correct the reported value in the config file",
            Self::DataDirNotFound => "Set \"data_dir\" in the config file",
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Directory for journal, reminder and stats records.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Daily step goal.
    #[serde(default = "default_step_goal")]
    pub step_goal: f64,

    /// Daily calorie goal.
    #[serde(default = "default_calorie_goal")]
    pub calorie_goal: f64,

    /// Seconds between step count refreshes.
    #[serde(default = "default_step_poll_interval_secs")]
    pub step_poll_interval_secs: u64,

    /// Allowed slack around the poll interval in seconds.
    ///
    /// Validated against the interval only; tokio timers do not coalesce,
    /// so polling does not use it.
    #[serde(default = "default_step_poll_tolerance_secs")]
    pub step_poll_tolerance_secs: u64,

    /// Whether the expiry alarm plays.
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,

    /// Custom alarm file. The built-in tone is used when unset.
    #[serde(default)]
    pub alarm_sound: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            step_goal: default_step_goal(),
            calorie_goal: default_calorie_goal(),
            step_poll_interval_secs: default_step_poll_interval_secs(),
            step_poll_tolerance_secs: default_step_poll_tolerance_secs(),
            sound_enabled: default_sound_enabled(),
            alarm_sound: None,
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_step_goal(mut self, goal: f64) -> Self {
        self.step_goal = goal;
        self
    }

    #[must_use]
    pub fn with_calorie_goal(mut self, goal: f64) -> Self {
        self.calorie_goal = goal;
        self
    }

    #[must_use]
    pub fn with_sound_enabled(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.step_goal.is_finite() || self.step_goal <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "step_goal must be positive, got {}",
                self.step_goal
            )));
        }
        if !self.calorie_goal.is_finite() || self.calorie_goal <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "calorie_goal must be positive, got {}",
                self.calorie_goal
            )));
        }
        if self.step_poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "step_poll_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.step_poll_tolerance_secs >= self.step_poll_interval_secs {
            return Err(ConfigError::Invalid(format!(
                "step_poll_tolerance_secs ({}) must be less than step_poll_interval_secs ({})",
                self.step_poll_tolerance_secs, self.step_poll_interval_secs
            )));
        }
        Ok(())
    }

    /// Loads configuration from `path`, or from the default location.
    ///
    /// A missing file is not an error. An explicit path that is missing
    /// is treated the same way so a fresh `--config` target can be used.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let config: Self =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Directory used for the record store.
    pub fn resolve_data_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(ConfigError::DataDirNotFound)
    }

    pub fn step_poll_interval(&self) -> Duration {
        Duration::from_secs(self.step_poll_interval_secs)
    }
}

/// `<config_dir>/traumafit/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}
