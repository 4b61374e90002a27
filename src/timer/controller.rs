//! Countdown controller.
//!
//! This module provides the timer state machine:
//! - State transitions (Idle → Running → Expired, Running → Idle on stop)
//! - Clock subscription management (at most one live subscription)
//! - Event publishing for observers
//! - Exactly-once expiry notification

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::clock::{ClockSource, SubscriptionId, TICK_PERIOD};
use super::notifier::ExpiryNotifier;
use crate::types::{TimerConfig, TimerPhase, TimerSnapshot, TimerState};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// A run started
    Started {
        /// Duration of the run
        total_seconds: u32,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds after this tick
        remaining_seconds: u32,
    },
    /// The run was stopped before expiry
    Stopped,
    /// The run reached zero
    Expired,
}

// ============================================================================
// TimerController
// ============================================================================

/// Countdown state machine driven by a [`ClockSource`].
///
/// The controller owns its [`TimerState`]; callers read it through
/// [`TimerController::snapshot`] and the accessors, never mutate it.
pub struct TimerController<C: ClockSource, N: ExpiryNotifier> {
    /// Current timer state
    state: TimerState,
    /// Tick source
    clock: C,
    /// Fired once per expiry
    notifier: N,
    /// The one live clock subscription, if running
    subscription: Option<SubscriptionId>,
    /// Optional observer channel
    event_tx: Option<mpsc::UnboundedSender<TimerEvent>>,
}

impl<C: ClockSource, N: ExpiryNotifier> TimerController<C, N> {
    /// Creates an idle controller.
    pub fn new(clock: C, notifier: N) -> Self {
        Self {
            state: TimerState::new(),
            clock,
            notifier,
            subscription: None,
            event_tx: None,
        }
    }

    /// Publishes [`TimerEvent`]s to `event_tx`.
    pub fn with_events(mut self, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    /// Starts a countdown of `hours:minutes:seconds`.
    ///
    /// A zero duration is ignored and leaves the controller untouched.
    /// Starting while a run is active replaces that run; its
    /// subscription is cancelled before the new one is created.
    pub fn start(&mut self, hours: u32, minutes: u32, seconds: u32) {
        self.start_with(TimerConfig::new(hours, minutes, seconds));
    }

    /// Starts a countdown from a [`TimerConfig`].
    pub fn start_with(&mut self, config: TimerConfig) {
        let duration = config.duration_seconds();
        if duration == 0 {
            debug!("Ignoring start request with zero duration");
            return;
        }

        self.cancel_subscription();
        self.state.start(duration);
        self.subscription = Some(self.clock.subscribe(TICK_PERIOD));

        info!("Timer started: {}", self.state.display_string());
        self.emit(TimerEvent::Started {
            total_seconds: duration,
        });
    }

    /// Stops the countdown without notifying.
    ///
    /// Does nothing unless a run is active.
    pub fn stop(&mut self) {
        self.cancel_subscription();
        if !self.state.is_running() {
            return;
        }

        self.state.stop();
        info!("Timer stopped");
        self.emit(TimerEvent::Stopped);
    }

    /// Delivers a tick from the clock source.
    ///
    /// Ticks from any subscription other than the live one are dropped,
    /// so a tick queued before a stop or restart never lands.
    pub fn on_tick(&mut self, id: SubscriptionId) {
        if self.subscription != Some(id) {
            debug!("Dropping stale tick from subscription {}", id.as_u64());
            return;
        }
        self.tick();
    }

    /// Advances the countdown by one second.
    fn tick(&mut self) {
        let expired = self.state.tick();
        self.emit(TimerEvent::Tick {
            remaining_seconds: self.state.remaining_seconds,
        });

        if expired {
            self.cancel_subscription();
            info!("Timer expired");
            self.emit(TimerEvent::Expired);
            self.notifier.notify_expired();
        }
    }

    /// Waits on `ticks` until the current run stops or expires.
    ///
    /// Returns the final phase. Returns immediately when idle.
    pub async fn run_to_completion(
        &mut self,
        ticks: &mut mpsc::UnboundedReceiver<SubscriptionId>,
    ) -> TimerPhase {
        while self.is_running() {
            match ticks.recv().await {
                Some(id) => self.on_tick(id),
                None => break,
            }
        }
        self.phase()
    }

    fn cancel_subscription(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.clock.cancel(id);
        }
    }

    fn emit(&self, event: TimerEvent) {
        if let Some(tx) = &self.event_tx {
            if tx.send(event).is_err() {
                debug!("Timer event observer dropped");
            }
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> TimerPhase {
        self.state.phase
    }

    /// Returns true while a run is counting down.
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    pub fn total_seconds(&self) -> u32 {
        self.state.total_seconds
    }

    /// Remaining time as a fraction of the run's total.
    pub fn progress_fraction(&self) -> f64 {
        self.state.progress_fraction()
    }

    /// Remaining time as `HHh MMm SSs`, or `Time's up!` once expired.
    pub fn display_string(&self) -> String {
        self.state.display_string()
    }

    /// Captures the observable view of the timer.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.snapshot()
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the live subscription, if any.
    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::clock::{IntervalClock, ManualClock};
    use crate::timer::notifier::MockExpiryNotifier;
    use crate::types::EXPIRED_MESSAGE;

    type TestController = TimerController<ManualClock, MockExpiryNotifier>;

    fn create_controller() -> (TestController, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller =
            TimerController::new(ManualClock::new(), MockExpiryNotifier::new()).with_events(tx);
        (controller, rx)
    }

    /// Fires `n` ticks from whichever subscription is live.
    fn fire(controller: &mut TestController, n: u32) {
        for _ in 0..n {
            if let Some(id) = controller.clock().active() {
                controller.on_tick(id);
            }
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    // ------------------------------------------------------------------------
    // Start / Stop
    // ------------------------------------------------------------------------

    mod start_stop_tests {
        use super::*;

        #[test]
        fn test_new_controller_is_idle() {
            let (controller, _rx) = create_controller();
            assert_eq!(controller.phase(), TimerPhase::Idle);
            assert!(!controller.is_running());
            assert_eq!(controller.subscription(), None);
            assert_eq!(controller.progress_fraction(), 0.0);
        }

        #[test]
        fn test_start() {
            let (mut controller, mut rx) = create_controller();
            controller.start(0, 1, 30);

            assert_eq!(controller.phase(), TimerPhase::Running);
            assert_eq!(controller.remaining_seconds(), 90);
            assert_eq!(controller.total_seconds(), 90);
            assert_eq!(controller.display_string(), "00h 01m 30s");
            assert_eq!(controller.progress_fraction(), 1.0);
            assert_eq!(controller.clock().active_count(), 1);
            assert_eq!(controller.clock().last_period(), Some(TICK_PERIOD));

            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::Started { total_seconds: 90 }
            );
        }

        #[test]
        fn test_start_zero_duration_is_noop() {
            let (mut controller, mut rx) = create_controller();
            controller.start(0, 0, 0);

            assert_eq!(controller.phase(), TimerPhase::Idle);
            assert_eq!(controller.subscription(), None);
            assert_eq!(controller.clock().subscribe_count(), 0);
            assert!(rx.try_recv().is_err());
        }

        #[test]
        fn test_start_with_huge_hours_arms_a_run() {
            let (mut controller, mut rx) = create_controller();
            controller.start(2_000_000, 0, 0);

            assert!(controller.is_running());
            assert_eq!(controller.total_seconds(), u32::MAX);
            assert_eq!(controller.clock().active_count(), 1);
            assert_eq!(
                rx.try_recv().unwrap(),
                TimerEvent::Started {
                    total_seconds: u32::MAX
                }
            );

            fire(&mut controller, 1);
            assert_eq!(controller.remaining_seconds(), u32::MAX - 1);
        }

        #[test]
        fn test_start_zero_duration_keeps_running_timer() {
            let (mut controller, _rx) = create_controller();
            controller.start(0, 0, 10);
            fire(&mut controller, 3);
            controller.start(0, 0, 0);

            assert!(controller.is_running());
            assert_eq!(controller.remaining_seconds(), 7);
        }

        #[test]
        fn test_stop() {
            let (mut controller, mut rx) = create_controller();
            controller.start(0, 0, 10);
            fire(&mut controller, 2);
            drain(&mut rx);

            controller.stop();

            assert_eq!(controller.phase(), TimerPhase::Idle);
            assert!(!controller.is_running());
            assert_eq!(controller.subscription(), None);
            assert_eq!(controller.clock().active_count(), 0);
            assert_eq!(controller.notifier().count(), 0);
            assert_eq!(rx.try_recv().unwrap(), TimerEvent::Stopped);
        }

        #[test]
        fn test_stop_is_idempotent() {
            let (mut controller, mut rx) = create_controller();
            controller.stop();
            controller.stop();

            assert_eq!(controller.phase(), TimerPhase::Idle);
            assert!(rx.try_recv().is_err());

            controller.start(0, 0, 5);
            controller.stop();
            controller.stop();
            drain(&mut rx);
            assert_eq!(controller.phase(), TimerPhase::Idle);
        }

        #[test]
        fn test_restart_cancels_previous_subscription() {
            let (mut controller, _rx) = create_controller();
            controller.start(0, 0, 10);
            let first = controller.subscription().unwrap();

            controller.start(0, 0, 20);
            let second = controller.subscription().unwrap();

            assert_ne!(first, second);
            assert_eq!(controller.clock().active_count(), 1);
            assert_eq!(controller.clock().active(), Some(second));
            assert_eq!(controller.remaining_seconds(), 20);
            assert_eq!(controller.total_seconds(), 20);
        }
    }

    // ------------------------------------------------------------------------
    // Ticking
    // ------------------------------------------------------------------------

    mod tick_tests {
        use super::*;

        #[test]
        fn test_tick_decrements_by_one() {
            let (mut controller, _rx) = create_controller();
            controller.start(0, 0, 30);

            for n in 1..30 {
                fire(&mut controller, 1);
                assert_eq!(controller.remaining_seconds(), 30 - n);
                assert!(controller.is_running());
            }
        }

        #[test]
        fn test_one_minute_after_one_tick() {
            let (mut controller, _rx) = create_controller();
            controller.start(0, 1, 0);
            fire(&mut controller, 1);

            assert_eq!(controller.remaining_seconds(), 59);
            assert_eq!(controller.display_string(), "00h 00m 59s");
            assert!((controller.progress_fraction() - 0.9833).abs() < 1e-4);
        }

        #[test]
        fn test_five_seconds_expire_after_five_ticks() {
            let (mut controller, mut rx) = create_controller();
            controller.start(0, 0, 5);
            fire(&mut controller, 5);

            assert_eq!(controller.phase(), TimerPhase::Expired);
            assert_eq!(controller.display_string(), EXPIRED_MESSAGE);
            assert_eq!(controller.progress_fraction(), 0.0);
            assert_eq!(controller.notifier().count(), 1);
            assert_eq!(controller.subscription(), None);
            assert_eq!(controller.clock().active_count(), 0);

            let events = drain(&mut rx);
            assert_eq!(events.first(), Some(&TimerEvent::Started { total_seconds: 5 }));
            assert_eq!(events.last(), Some(&TimerEvent::Expired));
            assert_eq!(events.len(), 1 + 5 + 1);
        }

        #[test]
        fn test_expiry_notifies_exactly_once() {
            let (mut controller, _rx) = create_controller();
            controller.start(0, 0, 3);
            let id = controller.subscription().unwrap();

            for _ in 0..10 {
                controller.on_tick(id);
            }

            assert_eq!(controller.phase(), TimerPhase::Expired);
            assert_eq!(controller.notifier().count(), 1);
        }

        #[test]
        fn test_expires_for_various_durations() {
            for duration in [1u32, 2, 7, 61, 3600] {
                let (mut controller, _rx) = create_controller();
                controller.start(0, 0, duration);
                fire(&mut controller, duration - 1);
                assert!(controller.is_running(), "duration {}", duration);

                fire(&mut controller, 1);
                assert_eq!(controller.phase(), TimerPhase::Expired, "duration {}", duration);
                assert_eq!(controller.notifier().count(), 1);
            }
        }

        #[test]
        fn test_progress_is_monotonic_and_bounded() {
            let (mut controller, _rx) = create_controller();
            controller.start(0, 2, 5);

            let mut previous = controller.progress_fraction();
            while controller.is_running() {
                fire(&mut controller, 1);
                let current = controller.progress_fraction();
                assert!((0.0..=1.0).contains(&current));
                assert!(current <= previous);
                previous = current;
            }
            assert_eq!(previous, 0.0);
        }

        #[test]
        fn test_stale_tick_after_stop_is_ignored() {
            let (mut controller, _rx) = create_controller();
            controller.start(0, 0, 10);
            let id = controller.subscription().unwrap();
            controller.stop();

            controller.on_tick(id);

            assert_eq!(controller.phase(), TimerPhase::Idle);
            assert_eq!(controller.remaining_seconds(), 0);
        }

        #[test]
        fn test_stale_tick_after_restart_is_ignored() {
            let (mut controller, _rx) = create_controller();
            controller.start(0, 0, 10);
            let old = controller.subscription().unwrap();
            controller.start(0, 0, 10);

            controller.on_tick(old);
            assert_eq!(controller.remaining_seconds(), 10);

            fire(&mut controller, 1);
            assert_eq!(controller.remaining_seconds(), 9);
        }

        #[test]
        fn test_restart_after_expiry() {
            let (mut controller, _rx) = create_controller();
            controller.start(0, 0, 2);
            fire(&mut controller, 2);
            assert_eq!(controller.phase(), TimerPhase::Expired);

            controller.start(0, 0, 4);
            assert_eq!(controller.phase(), TimerPhase::Running);
            assert_eq!(controller.remaining_seconds(), 4);
            assert_eq!(controller.total_seconds(), 4);
            assert_eq!(controller.progress_fraction(), 1.0);

            fire(&mut controller, 4);
            assert_eq!(controller.notifier().count(), 2);
        }

        #[test]
        fn test_stop_after_expiry_keeps_expired() {
            let (mut controller, mut rx) = create_controller();
            controller.start(0, 0, 1);
            fire(&mut controller, 1);
            drain(&mut rx);

            controller.stop();
            assert_eq!(controller.phase(), TimerPhase::Expired);
            assert!(rx.try_recv().is_err());
        }

        #[test]
        fn test_works_without_observer() {
            let mut controller = TimerController::new(ManualClock::new(), MockExpiryNotifier::new());
            controller.start(0, 0, 1);
            let id = controller.subscription().unwrap();
            controller.on_tick(id);
            assert_eq!(controller.notifier().count(), 1);
        }

        #[test]
        fn test_dropped_observer_does_not_break_ticks() {
            let (mut controller, rx) = create_controller();
            drop(rx);
            controller.start(0, 0, 2);
            fire(&mut controller, 2);
            assert_eq!(controller.phase(), TimerPhase::Expired);
        }
    }

    // ------------------------------------------------------------------------
    // Integration with the tokio clock
    // ------------------------------------------------------------------------

    mod interval_tests {
        use super::*;
        use tokio::time::{timeout, Duration};

        #[tokio::test]
        async fn test_run_to_completion_expires() {
            let (clock, mut ticks) = IntervalClock::new();
            let notifier = MockExpiryNotifier::new();
            let mut controller = TimerController::new(clock, notifier.clone());

            controller.start(0, 0, 2);
            let phase = timeout(Duration::from_secs(5), controller.run_to_completion(&mut ticks))
                .await
                .expect("countdown should finish");

            assert_eq!(phase, TimerPhase::Expired);
            assert_eq!(notifier.count(), 1);
            assert_eq!(controller.clock().active_count(), 0);
        }

        #[tokio::test]
        async fn test_run_to_completion_when_idle_returns_immediately() {
            let (clock, mut ticks) = IntervalClock::new();
            let mut controller = TimerController::new(clock, MockExpiryNotifier::new());

            let phase = controller.run_to_completion(&mut ticks).await;
            assert_eq!(phase, TimerPhase::Idle);
        }
    }
}
