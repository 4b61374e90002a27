//! Clock sources that drive the countdown.
//!
//! A clock source hands out subscriptions. While a subscription is
//! active the source delivers its id once per period; `cancel` stops
//! delivery immediately. Ticks are tagged with the subscription id so a
//! tick already in flight from a cancelled subscription can be told
//! apart from a live one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::debug;

/// Interval between countdown ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Identifies one subscription to a clock source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Returns the raw id value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// A source of periodic ticks.
pub trait ClockSource {
    /// Starts delivering ticks every `period` and returns the new
    /// subscription's id.
    fn subscribe(&mut self, period: Duration) -> SubscriptionId;

    /// Stops delivery for `id`. Cancelling an unknown or already
    /// cancelled id does nothing.
    fn cancel(&mut self, id: SubscriptionId);
}

// ============================================================================
// IntervalClock
// ============================================================================

/// Tokio-backed clock source.
///
/// Each subscription runs its own `tokio::time::interval` task that
/// sends the subscription id into the channel returned by
/// [`IntervalClock::new`]. Subscribing must happen inside a tokio
/// runtime.
#[derive(Debug)]
pub struct IntervalClock {
    tick_tx: mpsc::UnboundedSender<SubscriptionId>,
    tasks: HashMap<SubscriptionId, JoinHandle<()>>,
    next_id: u64,
}

impl IntervalClock {
    /// Creates a clock and the receiver its ticks arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SubscriptionId>) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let clock = Self {
            tick_tx,
            tasks: HashMap::new(),
            next_id: 0,
        };
        (clock, tick_rx)
    }

    /// Number of subscriptions currently delivering ticks.
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

impl ClockSource for IntervalClock {
    fn subscribe(&mut self, period: Duration) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        let tick_tx = self.tick_tx.clone();

        let handle = tokio::spawn(async move {
            // First tick one full period after subscribing.
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if tick_tx.send(id).is_err() {
                    break;
                }
            }
        });

        debug!("Clock subscription {} started", id.0);
        self.tasks.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: SubscriptionId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
            debug!("Clock subscription {} cancelled", id.0);
        }
    }
}

impl Drop for IntervalClock {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

// ============================================================================
// ManualClock
// ============================================================================

#[derive(Debug, Default)]
struct ManualClockInner {
    next_id: u64,
    active: Vec<SubscriptionId>,
    subscribe_calls: usize,
    cancel_calls: usize,
    last_period: Option<Duration>,
}

/// Clock source driven by hand, for tests and simulations.
///
/// Clones share state, so a test can keep one handle while the
/// controller owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    inner: Arc<Mutex<ManualClockInner>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently started subscription that is still active.
    #[must_use]
    pub fn active(&self) -> Option<SubscriptionId> {
        self.inner.lock().unwrap().active.last().copied()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.inner.lock().unwrap().active.len()
    }

    #[must_use]
    pub fn subscribe_count(&self) -> usize {
        self.inner.lock().unwrap().subscribe_calls
    }

    #[must_use]
    pub fn cancel_count(&self) -> usize {
        self.inner.lock().unwrap().cancel_calls
    }

    #[must_use]
    pub fn last_period(&self) -> Option<Duration> {
        self.inner.lock().unwrap().last_period
    }
}

impl ClockSource for ManualClock {
    fn subscribe(&mut self, period: Duration) -> SubscriptionId {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.active.push(id);
        inner.subscribe_calls += 1;
        inner.last_period = Some(period);
        id
    }

    fn cancel(&mut self, id: SubscriptionId) {
        let mut inner = self.inner.lock().unwrap();
        inner.cancel_calls += 1;
        inner.active.retain(|active| *active != id);
    }
}

// ============================================================================
// Tests
// ============================================================================
