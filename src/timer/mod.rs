//! Countdown timer service.
//!
//! This module contains the timer core:
//! - `clock`: Clock sources (tokio interval, manual) and subscriptions
//! - `controller`: The countdown state machine
//! - `notifier`: Expiry notification hooks

pub mod clock;
pub mod controller;
pub mod notifier;

pub use clock::{ClockSource, IntervalClock, ManualClock, SubscriptionId, TICK_PERIOD};
pub use controller::{TimerController, TimerEvent};
pub use notifier::{ExpiryNotifier, MockExpiryNotifier, SoundNotifier};
