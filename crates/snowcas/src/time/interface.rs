use std::sync::Arc;

/// Unix epoch: Thursday, January 1, 1970 00:00:00 UTC
///
/// A 41-bit timestamp counted from this epoch runs out in September 2039;
/// generators must not be used past `offset + Layout::max_timestamp()`.
pub const UNIX_EPOCH_MS: i64 = 0;

/// Custom epoch: Wednesday, January 1, 2025 00:00:00 UTC
pub const CUSTOM_EPOCH_MS: i64 = 1_735_689_600_000;

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH_MS: i64 = 1_288_834_974_657;

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH_MS: i64 = 1_420_070_400_000;

/// Instagram epoch: Saturday, January 1, 2011 00:00:00 UTC
pub const INSTAGRAM_EPOCH_MS: i64 = 1_293_840_000_000;

/// A clock that reports the current time in milliseconds since the Unix epoch.
///
/// Generators subtract their timestamp offset from this reading, so a time
/// source always reports absolute epoch milliseconds.
///
/// The reading is expected to be non-decreasing. A generator whose clock moves
/// backward spins until the clock catches up with the last timestamp it
/// handed out.
///
/// # Example
///
/// ```
/// use snowcas::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> i64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}
