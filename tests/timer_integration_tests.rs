//! Integration tests for the countdown timer.
//!
//! These tests drive `TimerController` through the public API:
//! - Full countdown to expiry with a manual clock
//! - Stop and restart flows, including stale ticks
//! - Event stream observed by a separate consumer
//! - Real-time countdown on the tokio interval clock

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use traumafit::sound::{MockSoundPlayer, SoundSource};
use traumafit::timer::{
    IntervalClock, ManualClock, MockExpiryNotifier, SoundNotifier, TimerController, TimerEvent,
    TICK_PERIOD,
};
use traumafit::types::{TimerPhase, EXPIRED_MESSAGE};

// ============================================================================
// Test Helpers
// ============================================================================

/// Creates a controller on a manual clock, returning shared handles.
fn create_controller() -> (
    TimerController<ManualClock, MockExpiryNotifier>,
    ManualClock,
    MockExpiryNotifier,
) {
    let clock = ManualClock::new();
    let notifier = MockExpiryNotifier::new();
    let controller = TimerController::new(clock.clone(), notifier.clone());
    (controller, clock, notifier)
}

/// Delivers `n` ticks from whatever subscription is active.
fn advance(
    controller: &mut TimerController<ManualClock, MockExpiryNotifier>,
    clock: &ManualClock,
    n: u32,
) {
    for _ in 0..n {
        let Some(id) = clock.active() else {
            return;
        };
        controller.on_tick(id);
    }
}

fn drain(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

// ============================================================================
// Countdown Flow
// ============================================================================

/// A 90 second countdown expires after exactly 90 ticks.
#[test]
fn countdown_expires_after_duration_ticks() {
    let (mut controller, clock, notifier) = create_controller();

    controller.start(0, 1, 30);
    assert_eq!(controller.total_seconds(), 90);
    assert_eq!(clock.last_period(), Some(TICK_PERIOD));

    advance(&mut controller, &clock, 89);
    assert!(controller.is_running());
    assert_eq!(controller.display_string(), "00h 00m 01s");
    assert_eq!(notifier.count(), 0);

    advance(&mut controller, &clock, 1);
    assert_eq!(controller.phase(), TimerPhase::Expired);
    assert_eq!(controller.remaining_seconds(), 0);
    assert_eq!(controller.progress_fraction(), 0.0);
    assert_eq!(notifier.count(), 1);
    assert_eq!(clock.active_count(), 0);
}

/// Progress never increases while the countdown runs.
#[test]
fn progress_is_monotonic() {
    let (mut controller, clock, _notifier) = create_controller();
    controller.start(0, 0, 45);

    let mut last = controller.progress_fraction();
    assert_eq!(last, 1.0);
    while controller.is_running() {
        advance(&mut controller, &clock, 1);
        let now = controller.progress_fraction();
        assert!(now <= last);
        last = now;
    }
}

/// Extra ticks after expiry do not notify again.
#[test]
fn expiry_notifies_once() {
    let (mut controller, clock, notifier) = create_controller();
    controller.start(0, 0, 2);
    let id = clock.active().unwrap();

    controller.on_tick(id);
    controller.on_tick(id);
    controller.on_tick(id);
    controller.on_tick(id);

    assert_eq!(notifier.count(), 1);
    assert_eq!(controller.phase(), TimerPhase::Expired);
}

// ============================================================================
// Stop / Restart Flow
// ============================================================================

/// Stopping mid-run resets everything and ignores late ticks.
#[test]
fn stop_mid_run_then_late_tick() {
    let (mut controller, clock, notifier) = create_controller();
    controller.start(0, 10, 0);
    let id = clock.active().unwrap();
    advance(&mut controller, &clock, 30);

    controller.stop();
    assert_eq!(controller.phase(), TimerPhase::Idle);
    assert_eq!(controller.remaining_seconds(), 0);
    assert_eq!(controller.total_seconds(), 0);
    assert_eq!(clock.active_count(), 0);

    controller.on_tick(id);
    assert_eq!(controller.phase(), TimerPhase::Idle);
    assert_eq!(notifier.count(), 0);
}

/// Restarting while running replaces the subscription.
#[test]
fn restart_while_running_keeps_one_subscription() {
    let (mut controller, clock, _notifier) = create_controller();
    controller.start(0, 0, 30);
    let first = clock.active().unwrap();
    advance(&mut controller, &clock, 10);

    controller.start(0, 0, 5);
    let second = clock.active().unwrap();
    assert_ne!(first, second);
    assert_eq!(clock.active_count(), 1);
    assert_eq!(controller.remaining_seconds(), 5);

    // A tick still in flight from the first run changes nothing.
    controller.on_tick(first);
    assert_eq!(controller.remaining_seconds(), 5);
}

/// A new run can start after expiry.
#[test]
fn start_again_after_expiry() {
    let (mut controller, clock, notifier) = create_controller();
    controller.start(0, 0, 1);
    advance(&mut controller, &clock, 1);
    assert_eq!(controller.phase(), TimerPhase::Expired);

    controller.start(0, 0, 3);
    assert!(controller.is_running());
    advance(&mut controller, &clock, 3);
    assert_eq!(notifier.count(), 2);
}

/// A zero duration start does nothing.
#[test]
fn zero_duration_is_ignored() {
    let (mut controller, clock, _notifier) = create_controller();
    controller.start(0, 0, 0);

    assert_eq!(controller.phase(), TimerPhase::Idle);
    assert_eq!(clock.subscribe_count(), 0);
}

// ============================================================================
// Event Stream
// ============================================================================

/// Observers see start, ticks and expiry in order.
#[test]
fn events_follow_countdown() {
    let clock = ManualClock::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut controller =
        TimerController::new(clock.clone(), MockExpiryNotifier::new()).with_events(tx);

    controller.start(0, 0, 2);
    let id = clock.active().unwrap();
    controller.on_tick(id);
    controller.on_tick(id);

    assert_eq!(
        drain(&mut rx),
        vec![
            TimerEvent::Started { total_seconds: 2 },
            TimerEvent::Tick {
                remaining_seconds: 1
            },
            TimerEvent::Tick {
                remaining_seconds: 0
            },
            TimerEvent::Expired,
        ]
    );
}

/// The snapshot serializes with the field names observers expect.
#[test]
fn snapshot_for_observers() {
    let (mut controller, clock, _notifier) = create_controller();
    controller.start(0, 1, 0);
    advance(&mut controller, &clock, 1);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.display, "00h 00m 59s");
    assert!((snapshot.progress - 59.0 / 60.0).abs() < 1e-9);

    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"remainingSeconds\":59"));
    assert!(json.contains("\"totalSeconds\":60"));
}

// ============================================================================
// Notifier Composition
// ============================================================================

/// Expiry plays the configured alarm exactly once.
#[test]
fn sound_notifier_plays_alarm_on_expiry() {
    let clock = ManualClock::new();
    let notifier = SoundNotifier::new(MockSoundPlayer::new(), SoundSource::tone(440, 10)).without_bell();
    let mut controller = TimerController::new(clock.clone(), notifier);

    controller.start(0, 0, 2);
    let id = clock.active().unwrap();
    controller.on_tick(id);
    assert_eq!(controller.notifier().player().play_count(), 0);

    controller.on_tick(id);
    assert_eq!(controller.notifier().player().play_count(), 1);
    assert_eq!(EXPIRED_MESSAGE, "Time's up!");
}

/// Closures work as notifiers.
#[test]
fn closure_notifier() {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    let clock = ManualClock::new();
    let mut controller = TimerController::new(clock.clone(), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    controller.start(0, 0, 1);
    controller.on_tick(clock.active().unwrap());
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Real Clock
// ============================================================================

/// A short countdown completes on the tokio interval clock.
#[tokio::test]
async fn interval_clock_counts_down() {
    let (clock, mut ticks) = IntervalClock::new();
    let notifier = MockExpiryNotifier::new();
    let mut controller = TimerController::new(clock, notifier.clone());

    controller.start(0, 0, 2);
    let phase = timeout(
        Duration::from_secs(10),
        controller.run_to_completion(&mut ticks),
    )
    .await
    .unwrap();

    assert_eq!(phase, TimerPhase::Expired);
    assert_eq!(notifier.count(), 1);
    assert_eq!(controller.clock().active_count(), 0);
}

/// After stop no further ticks arrive from the interval clock.
#[tokio::test]
async fn interval_clock_silent_after_stop() {
    let (clock, mut ticks) = IntervalClock::new();
    let mut controller = TimerController::new(clock, MockExpiryNotifier::new());

    controller.start(0, 0, 30);
    let id = ticks.recv().await.unwrap();
    controller.on_tick(id);
    controller.stop();

    let next = timeout(Duration::from_millis(1500), ticks.recv()).await;
    assert!(next.is_err(), "no tick expected after stop");
}
