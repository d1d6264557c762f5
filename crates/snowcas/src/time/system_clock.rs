use std::time::{SystemTime, UNIX_EPOCH};

use crate::TimeSource;

/// The default real-time clock, read from [`SystemTime`] on every call.
///
/// Wall-clock time can be adjusted by NTP or an operator. Prefer
/// [`MonotonicClock`] where that matters.
///
/// [`MonotonicClock`]: crate::MonotonicClock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    /// Reports `0` for a system clock set before 1970.
    fn current_millis(&self) -> i64 {
        unix_millis_now()
    }
}

pub(crate) fn unix_millis_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}
