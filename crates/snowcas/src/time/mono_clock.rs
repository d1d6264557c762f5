use std::{
    sync::{
        Arc, OnceLock,
        atomic::{AtomicI64, Ordering},
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crate::{TimeSource, time::system_clock::unix_millis_now};

/// Shared ticker thread that updates every millisecond.
#[derive(Debug)]
struct SharedTickerInner {
    elapsed: AtomicI64,
    _handle: OnceLock<JoinHandle<()>>,
}

/// A monotonic time source anchored to wall-clock time once, at construction.
///
/// A background thread advances a shared counter once per millisecond using
/// [`Instant`], so readings never go backward even if the system clock is
/// adjusted, and the hot path never makes a syscall. The thread exits once the
/// last clone of the clock is dropped.
///
/// Clones share the same ticker, so one clock can drive several generators.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    inner: Arc<SharedTickerInner>,
    anchor_ms: i64,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Starts a new ticker anchored to the current Unix time.
    ///
    /// # Example
    ///
    /// ```
    /// use snowcas::{MonotonicClock, TimeSource};
    ///
    /// let clock = MonotonicClock::new();
    /// let before = clock.current_millis();
    /// std::thread::sleep(std::time::Duration::from_millis(5));
    ///
    /// // The ticker may trail real time by a tick or so, but never goes
    /// // backward.
    /// assert!(clock.current_millis() >= before);
    /// ```
    pub fn new() -> Self {
        let start = Instant::now();
        let anchor_ms = unix_millis_now();

        let inner = Arc::new(SharedTickerInner {
            elapsed: AtomicI64::new(0),
            _handle: OnceLock::new(),
        });

        let weak_inner = Arc::downgrade(&inner);
        let handle = thread::spawn(move || {
            let mut tick = 0;

            loop {
                let Some(inner_ref) = weak_inner.upgrade() else {
                    break;
                };

                // Absolute target time of the next tick
                let target = start + Duration::from_millis(tick);

                let now = Instant::now();
                if now < target {
                    thread::sleep(target - now);
                }

                let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                inner_ref
                    .elapsed
                    .store(i64::try_from(now_ms).unwrap_or(i64::MAX), Ordering::Relaxed);

                tick = now_ms.saturating_add(1);
            }
        });

        // Freshly created, so the cell is always empty.
        let _ = inner._handle.set(handle);

        Self { inner, anchor_ms }
    }

    /// Unix milliseconds this clock was anchored to.
    pub fn anchor_ms(&self) -> i64 {
        self.anchor_ms
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> i64 {
        self.anchor_ms
            .saturating_add(self.inner.elapsed.load(Ordering::Relaxed))
    }
}
