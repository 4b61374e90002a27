//! Fixed-capacity step history.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Days of history kept for the step chart.
pub const HISTORY_CAPACITY: usize = 7;

/// Rolling FIFO of recent step samples.
///
/// Samples are appended at the end; once the capacity is exceeded the
/// oldest sample is dropped from the front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepHistory {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl Default for StepHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl StepHistory {
    /// Creates an empty history holding at most `capacity` samples.
    ///
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends a sample, evicting the oldest when full.
    pub fn push(&mut self, sample: f64) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Samples from oldest to newest.
    pub fn samples(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Extend<f64> for StepHistory {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for sample in iter {
            self.push(sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        let history = StepHistory::default();
        assert_eq!(history.capacity(), HISTORY_CAPACITY);
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);
    }

    #[test]
    fn test_push_below_capacity() {
        let mut history = StepHistory::default();
        history.push(3000.0);
        history.push(4000.0);

        assert_eq!(history.samples(), vec![3000.0, 4000.0]);
        assert_eq!(history.latest(), Some(4000.0));
    }

    #[test]
    fn test_eight_samples_keep_last_seven_in_order() {
        let mut history = StepHistory::default();
        history.extend((1..=8).map(|n| f64::from(n) * 1000.0));

        assert_eq!(history.len(), 7);
        assert_eq!(
            history.samples(),
            vec![2000.0, 3000.0, 4000.0, 5000.0, 6000.0, 7000.0, 8000.0]
        );
    }

    #[test]
    fn test_many_samples_never_exceed_capacity() {
        let mut history = StepHistory::with_capacity(3);
        for n in 0..100 {
            history.push(f64::from(n));
            assert!(history.len() <= 3);
        }
        assert_eq!(history.samples(), vec![97.0, 98.0, 99.0]);
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut history = StepHistory::with_capacity(0);
        history.push(1.0);
        history.push(2.0);
        assert_eq!(history.samples(), vec![2.0]);
    }
}
