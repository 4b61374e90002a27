//! Expiry notifiers.
//!
//! The controller only guarantees one `notify_expired` call per expiry.
//! What that call does (sound, bell, nothing) belongs to the notifier.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::warn;

use crate::sound::{SoundPlayer, SoundSource};

/// Side-effect hook fired when a countdown runs out.
pub trait ExpiryNotifier {
    fn notify_expired(&self);
}

impl<F: Fn()> ExpiryNotifier for F {
    fn notify_expired(&self) {
        self()
    }
}

/// Counts expiry notifications.
#[derive(Debug, Clone, Default)]
pub struct MockExpiryNotifier {
    calls: Arc<AtomicUsize>,
}

impl MockExpiryNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `notify_expired` has been called.
    #[must_use]
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ExpiryNotifier for MockExpiryNotifier {
    fn notify_expired(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Plays the alarm and rings the terminal bell.
///
/// The bell stands in for the vibration a phone would give.
pub struct SoundNotifier<P: SoundPlayer> {
    player: P,
    alarm: SoundSource,
    ring_bell: bool,
}

impl<P: SoundPlayer> SoundNotifier<P> {
    pub fn new(player: P, alarm: SoundSource) -> Self {
        Self {
            player,
            alarm,
            ring_bell: true,
        }
    }

    /// Disables the terminal bell.
    #[must_use]
    pub fn without_bell(mut self) -> Self {
        self.ring_bell = false;
        self
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn alarm(&self) -> &SoundSource {
        &self.alarm
    }
}

impl<P: SoundPlayer> ExpiryNotifier for SoundNotifier<P> {
    fn notify_expired(&self) {
        if self.ring_bell {
            let mut stdout = std::io::stdout();
            let _ = stdout.write_all(b"\x07");
            let _ = stdout.flush();
        }
        if let Err(e) = self.player.play(&self.alarm) {
            warn!("Alarm playback failed: {} ({})", e, e.suggestion());
        }
    }
}
