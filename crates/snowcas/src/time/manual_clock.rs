use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

use crate::TimeSource;

/// A deterministic, caller-controlled clock.
///
/// Clones share the same reading, so a test can hand one clone to a generator
/// and step time forward (or backward) with the other.
///
/// # Example
///
/// ```
/// use snowcas::{ManualClock, TimeSource};
///
/// let clock = ManualClock::new(42);
/// let handle = clock.clone();
///
/// handle.advance(1);
/// assert_eq!(clock.current_millis(), 43);
///
/// handle.set(7);
/// assert_eq!(clock.current_millis(), 7);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(millis: i64) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(millis)),
        }
    }

    /// Moves the clock to an absolute reading.
    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    /// Moves the clock by `delta_ms` and returns the new reading.
    pub fn advance(&self, delta_ms: i64) -> i64 {
        self.millis.fetch_add(delta_ms, Ordering::SeqCst) + delta_ms
    }
}

impl TimeSource for ManualClock {
    fn current_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}
