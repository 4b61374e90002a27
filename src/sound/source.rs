//! Alarm sound sources.
//!
//! An alarm is either a user-supplied ringtone file or the built-in
//! synthesized tone, which needs no file on disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

use super::error::SoundError;

/// Frequency of the built-in alarm tone.
pub const DEFAULT_TONE_HZ: u32 = 880;

/// Length of the built-in alarm tone.
pub const DEFAULT_TONE_MS: u64 = 1500;

/// Longest the process stays alive after expiry to let an alarm finish.
pub const MAX_ALARM_WAIT: Duration = Duration::from_secs(30);

/// File extensions the decoder is expected to handle.
const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac"];

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A ringtone file on disk.
    File {
        /// Display name (the file stem).
        name: String,
        /// Full path to the sound file.
        path: PathBuf,
    },
    /// A synthesized sine tone.
    Tone {
        /// Tone frequency in hertz.
        frequency_hz: u32,
        /// Tone length in milliseconds.
        duration_ms: u64,
    },
}

impl SoundSource {
    /// Creates a file source without checking the path.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ringtone".to_string());
        Self::File { name, path }
    }

    /// Creates a file source after checking existence and extension.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::FileNotFound` or `SoundError::UnsupportedFormat`.
    pub fn file_validated(path: impl Into<PathBuf>) -> Result<Self, SoundError> {
        let path = path.into();
        validate_sound_file(&path)?;
        Ok(Self::file(path))
    }

    /// Creates a tone source.
    #[must_use]
    pub fn tone(frequency_hz: u32, duration_ms: u64) -> Self {
        Self::Tone {
            frequency_hz,
            duration_ms,
        }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } => name,
            Self::Tone { .. } => "tone",
        }
    }

    /// Returns true if this source reads from disk.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns the file path for file sources.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Tone { .. } => None,
        }
    }

    /// Playback length, when it is known without playing the sound.
    ///
    /// A ringtone that cannot be decoded reports the built-in tone's
    /// length, since that is what plays instead.
    #[must_use]
    pub fn playback_duration(&self) -> Option<Duration> {
        match self {
            Self::Tone { duration_ms, .. } => Some(Duration::from_millis(*duration_ms)),
            Self::File { path, .. } => file_duration(path),
        }
    }

    /// How long to wait for this alarm to finish, capped at [`MAX_ALARM_WAIT`].
    ///
    /// Unknown lengths wait for the full cap.
    #[must_use]
    pub fn alarm_wait(&self) -> Duration {
        self.playback_duration()
            .map_or(MAX_ALARM_WAIT, |length| length.min(MAX_ALARM_WAIT))
    }
}

#[cfg(feature = "audio")]
fn file_duration(path: &Path) -> Option<Duration> {
    use rodio::Source;

    let fallback = Some(Duration::from_millis(DEFAULT_TONE_MS));
    let Ok(file) = std::fs::File::open(path) else {
        return fallback;
    };
    match rodio::Decoder::new(std::io::BufReader::new(file)) {
        Ok(decoder) => decoder.total_duration(),
        Err(_) => fallback,
    }
}

#[cfg(not(feature = "audio"))]
fn file_duration(_path: &Path) -> Option<Duration> {
    None
}

fn validate_sound_file(path: &Path) -> Result<(), SoundError> {
    if !path.is_file() {
        return Err(SoundError::FileNotFound(path.display().to_string()));
    }
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(SoundError::UnsupportedFormat(path.display().to_string()));
    }
    Ok(())
}

/// Returns the built-in alarm tone.
#[must_use]
pub fn default_alarm() -> SoundSource {
    SoundSource::tone(DEFAULT_TONE_HZ, DEFAULT_TONE_MS)
}

/// Picks the alarm for a configured ringtone path.
///
/// Falls back to the built-in tone when no path is configured or the
/// file cannot be used.
#[must_use]
pub fn resolve_alarm(ringtone: Option<&Path>) -> SoundSource {
    let Some(path) = ringtone else {
        return default_alarm();
    };
    match SoundSource::file_validated(path) {
        Ok(source) => source,
        Err(e) => {
            warn!("Ringtone unusable ({}), using built-in tone", e);
            default_alarm()
        }
    }
}
