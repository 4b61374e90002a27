//! Alarm playback for timer expiry.
//!
//! This module provides audio notification capabilities, including:
//!
//! - A `SoundPlayer` abstraction with mock and silent implementations
//! - Ringtone files with a synthesized-tone fallback
//! - Real playback through rodio when built with the `audio` feature
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundPlayer    │ ← Main interface
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   SoundSource    │────▶│ Ringtone file    │
//! │                  │     ├──────────────────┤
//! │                  │────▶│ Sine tone        │
//! └──────────────────┘     │  (fallback)      │
//!                          └──────────────────┘
//! ```
//!
//! Audio is strictly best effort: `create_player` degrades to a
//! `SilentSoundPlayer` whenever no output device can be opened.

mod error;
#[cfg(feature = "audio")]
mod player;
mod source;

pub use error::SoundError;
#[cfg(feature = "audio")]
pub use player::RodioSoundPlayer;
pub use source::{
    default_alarm, resolve_alarm, SoundSource, DEFAULT_TONE_HZ, DEFAULT_TONE_MS, MAX_ALARM_WAIT,
};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::debug;

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays a sound from the given source.
    ///
    /// This method should be non-blocking; the sound plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Returns true if an audio device backs this player.
    fn is_available(&self) -> bool;

    /// Returns true if sound playback is disabled.
    fn is_disabled(&self) -> bool;

    /// Enables sound playback.
    fn enable(&self);

    /// Disables sound playback.
    fn disable(&self);
}

#[cfg(feature = "audio")]
impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn is_disabled(&self) -> bool {
        RodioSoundPlayer::is_disabled(self)
    }

    fn enable(&self) {
        RodioSoundPlayer::enable(self)
    }

    fn disable(&self) {
        RodioSoundPlayer::disable(self)
    }
}

/// Player used when no audio device exists. Every call succeeds silently.
#[derive(Debug, Default)]
pub struct SilentSoundPlayer {
    disabled: AtomicBool,
}

impl SilentSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SoundPlayer for SilentSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        debug!("No audio output, skipping '{}'", source.name());
        Ok(())
    }

    fn is_available(&self) -> bool {
        false
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    fn enable(&self) {
        self.disabled.store(false, Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disabled.store(true, Ordering::SeqCst);
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    disabled: AtomicBool,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().unwrap().clone()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        if self.disabled.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.play_calls.lock().unwrap().push(source.clone());
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    fn enable(&self) {
        self.disabled.store(false, Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disabled.store(true, Ordering::SeqCst);
    }
}

impl<P: SoundPlayer + ?Sized> SoundPlayer for Box<P> {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        (**self).play(source)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn is_disabled(&self) -> bool {
        (**self).is_disabled()
    }

    fn enable(&self) {
        (**self).enable()
    }

    fn disable(&self) {
        (**self).disable()
    }
}

/// Creates the best available player.
///
/// A disabled player never opens an output device. Otherwise, with the
/// `audio` feature, this opens the default output device; when that
/// fails, or without the feature, a silent player is returned.
#[must_use]
pub fn create_player(enabled: bool) -> Box<dyn SoundPlayer> {
    if !enabled {
        debug!("Sound disabled, using silent player");
        let player = SilentSoundPlayer::new();
        player.disable();
        return Box::new(player);
    }

    #[cfg(feature = "audio")]
    {
        match RodioSoundPlayer::new(false) {
            Ok(player) => return Box::new(player),
            Err(e) => tracing::warn!("Audio not available, alarm will be silent: {}", e),
        }
    }

    Box::new(SilentSoundPlayer::new())
}
