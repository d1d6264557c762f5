/// The outcome of a single generation attempt.
///
/// Returned by [`SnowflakeGenerator::poll_id`], which never loops. This lets
/// callers choose their own backoff: spin, yield, or sleep.
///
/// [`SnowflakeGenerator::poll_id`]: crate::SnowflakeGenerator::poll_id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: i64,
    },
    /// No ID could be generated on this attempt.
    ///
    /// `yield_for == 0` means another caller won the compare-and-swap race;
    /// retry immediately. Otherwise the sequence is exhausted for the current
    /// millisecond (or the clock is behind the last issued timestamp) and
    /// `yield_for` is the number of milliseconds until the clock is expected to
    /// move past it.
    Pending {
        /// Milliseconds to wait before retrying.
        yield_for: i64,
    },
}
