use portable_atomic::{AtomicI64, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    config::GeneratorConfig,
    error::{ConfigError, Result},
    generator::IdGenStatus,
    layout::{DEFAULT_NODE_ID_BITS, DEFAULT_SEQUENCE_BITS, Layout, SnowflakeParts},
    time::{SystemClock, TimeSource},
};

/// A lock-free Snowflake ID generator shared by any number of threads.
///
/// All mutable state lives in a single [`AtomicI64`] holding the last issued
/// `(timestamp, sequence)` pair. The node id never enters that word; it is
/// OR'd into the result on return. Every other field is frozen at
/// construction.
///
/// With the `cache-padded` feature (on by default) the state word sits on its
/// own cache line so that contended writes do not evict the read-only fields.
///
/// ## Features
/// - ✅ Thread-safe, lock-free
/// - ✅ Runtime-configurable node id and sequence widths
/// - ❌ Wait-free: a caller may retry arbitrarily often under contention, and
///   spins while the sequence is exhausted
///
/// ## Clock requirements
/// The clock must not move backward. If it does, callers spin until it
/// catches up with the last issued timestamp.
///
/// The clock must also stay within the timestamp budget:
/// `clock - timestamp_offset_ms <= layout().max_timestamp()`. Past that point
/// the timestamp spills into the sign bit and IDs turn negative. With a zero
/// offset and the default layout this happens in September 2039.
#[derive(Debug)]
pub struct SnowflakeGenerator<T>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicI64>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicI64,
    layout: Layout,
    node_id: i64,
    node_component: i64,
    timestamp_offset_ms: i64,
    clock: T,
}

impl<T> SnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator after validating its whole configuration.
    ///
    /// Checks run in order and stop at the first failure: bit widths, bit
    /// budget, node id range, offset sign, then the offset against the clock's
    /// current reading.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] variant; see the type for the conditions.
    ///
    /// # Example
    /// ```
    /// use snowcas::{CUSTOM_EPOCH_MS, MonotonicClock, SnowflakeGenerator};
    ///
    /// let generator = SnowflakeGenerator::new(8, 14, 3, CUSTOM_EPOCH_MS, MonotonicClock::new())?;
    ///
    /// let id = generator.next_id();
    /// assert_eq!(generator.extract_node_id(id), 3);
    /// # Ok::<(), snowcas::ConfigError>(())
    /// ```
    pub fn new(
        node_id_bits: i32,
        sequence_bits: i32,
        node_id: i64,
        timestamp_offset_ms: i64,
        clock: T,
    ) -> Result<Self> {
        let result = Self::validate(
            node_id_bits,
            sequence_bits,
            node_id,
            timestamp_offset_ms,
            clock,
        );

        #[cfg(feature = "tracing")]
        match &result {
            Ok(generator) => tracing::debug!(
                node_id = generator.node_id,
                node_id_bits = generator.layout.node_id_bits(),
                sequence_bits = generator.layout.sequence_bits(),
                timestamp_offset_ms = generator.timestamp_offset_ms,
                "snowflake generator created"
            ),
            Err(err) => tracing::warn!(error = %err, "rejected snowflake generator configuration"),
        }

        result
    }

    /// Creates a generator with the default 10-bit node id and 12-bit
    /// sequence layout.
    ///
    /// # Errors
    ///
    /// Same as [`SnowflakeGenerator::new`].
    pub fn with_node_id(node_id: i64, timestamp_offset_ms: i64, clock: T) -> Result<Self> {
        Self::new(
            DEFAULT_NODE_ID_BITS,
            DEFAULT_SEQUENCE_BITS,
            node_id,
            timestamp_offset_ms,
            clock,
        )
    }

    /// Creates a generator from a [`GeneratorConfig`].
    ///
    /// # Errors
    ///
    /// Same as [`SnowflakeGenerator::new`].
    pub fn from_config(config: &GeneratorConfig, clock: T) -> Result<Self> {
        Self::new(
            config.node_id_bits,
            config.sequence_bits,
            config.node_id,
            config.timestamp_offset_ms,
            clock,
        )
    }

    fn validate(
        node_id_bits: i32,
        sequence_bits: i32,
        node_id: i64,
        timestamp_offset_ms: i64,
        clock: T,
    ) -> Result<Self> {
        let layout = Layout::new(node_id_bits, sequence_bits)?;
        layout.validate_node_id(node_id)?;

        if timestamp_offset_ms < 0 {
            return Err(ConfigError::InvalidOffset {
                offset_ms: timestamp_offset_ms,
            });
        }
        let now_ms = clock.current_millis();
        if timestamp_offset_ms > now_ms {
            return Err(ConfigError::OffsetInFuture {
                offset_ms: timestamp_offset_ms,
                now_ms,
            });
        }

        Ok(Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(AtomicI64::new(0)),
            #[cfg(not(feature = "cache-padded"))]
            state: AtomicI64::new(0),
            layout,
            node_id,
            node_component: layout.node_component(node_id),
            timestamp_offset_ms,
            clock,
        })
    }

    /// Generates the next ID, spinning until one is available.
    ///
    /// Lost compare-and-swap races are retried immediately. While the sequence
    /// is exhausted for the current millisecond, the caller busy-waits with a
    /// CPU pause hint until the clock ticks.
    ///
    /// Never fails and cannot be cancelled.
    ///
    /// # Example
    /// ```
    /// use snowcas::{ManualClock, SnowflakeGenerator};
    ///
    /// let clock = ManualClock::new(1_000);
    /// let generator = SnowflakeGenerator::with_node_id(7, 0, clock)?;
    ///
    /// let a = generator.next_id();
    /// let b = generator.next_id();
    /// assert!(a < b);
    /// assert_eq!(generator.extract_timestamp(a), 1_000);
    /// assert_eq!(generator.extract_sequence(b), 1);
    /// # Ok::<(), snowcas::ConfigError>(())
    /// ```
    pub fn next_id(&self) -> i64 {
        loop {
            match self.poll_id() {
                IdGenStatus::Ready { id } => return id,
                IdGenStatus::Pending { yield_for: 0 } => {}
                IdGenStatus::Pending { .. } => core::hint::spin_loop(),
            }
        }
    }

    /// Makes a single attempt at generating an ID.
    ///
    /// - clock ahead of the stored timestamp: reset the sequence to zero at the
    ///   new timestamp
    /// - same (or earlier) timestamp with sequence room: increment the sequence
    /// - sequence exhausted: no update, report how long to wait
    ///
    /// See [`IdGenStatus`] for how to interpret a pending result.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_id(&self) -> IdGenStatus {
        let current = self.state.load(Ordering::SeqCst);
        let current_ts = current >> self.layout.shift();
        let now = self
            .clock
            .current_millis()
            .saturating_sub(self.timestamp_offset_ms);

        let next = if now > current_ts {
            now << self.layout.shift()
        } else if current & self.layout.max_sequence() < self.layout.max_sequence() {
            current + 1
        } else {
            return Self::cold_wait(now, current_ts);
        };

        if self
            .state
            .compare_exchange(current, next, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            IdGenStatus::Ready {
                id: next | self.node_component,
            }
        } else {
            // Another caller won the race. Retry immediately.
            IdGenStatus::Pending { yield_for: 0 }
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_wait(now: i64, current_ts: i64) -> IdGenStatus {
        let yield_for = current_ts.saturating_sub(now).saturating_add(1);
        debug_assert!(yield_for >= 1);
        #[cfg(feature = "tracing")]
        tracing::trace!(now, current_ts, yield_for, "waiting for clock to advance");
        IdGenStatus::Pending { yield_for }
    }

    pub fn node_id(&self) -> i64 {
        self.node_id
    }

    pub fn timestamp_offset_ms(&self) -> i64 {
        self.timestamp_offset_ms
    }

    pub fn max_node_id(&self) -> i64 {
        self.layout.max_node_id()
    }

    pub fn max_sequence(&self) -> i64 {
        self.layout.max_sequence()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// The configuration this generator was built from.
    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            // Widths are capped at `MAX_LAYOUT_BITS`, so they always fit.
            node_id_bits: self.layout.node_id_bits() as i32,
            sequence_bits: self.layout.sequence_bits() as i32,
            node_id: self.node_id,
            timestamp_offset_ms: self.timestamp_offset_ms,
        }
    }

    /// Milliseconds since [`Self::timestamp_offset_ms`]. Add the offset back
    /// to recover Unix time.
    pub fn extract_timestamp(&self, id: i64) -> i64 {
        self.layout.extract_timestamp(id)
    }

    pub fn extract_node_id(&self, id: i64) -> i64 {
        self.layout.extract_node_id(id)
    }

    pub fn extract_sequence(&self, id: i64) -> i64 {
        self.layout.extract_sequence(id)
    }

    pub fn decompose(&self, id: i64) -> SnowflakeParts {
        self.layout.decompose(id)
    }
}

impl SnowflakeGenerator<SystemClock> {
    /// Creates a generator with the default layout, reading time from
    /// [`SystemClock`].
    ///
    /// # Errors
    ///
    /// Same as [`SnowflakeGenerator::new`].
    ///
    /// # Example
    /// ```
    /// use snowcas::{SnowflakeGenerator, TWITTER_EPOCH_MS};
    ///
    /// let generator = SnowflakeGenerator::with_defaults(1, TWITTER_EPOCH_MS)?;
    /// assert_eq!(generator.max_node_id(), 1023);
    /// assert_eq!(generator.max_sequence(), 4095);
    /// assert!(generator.next_id() > 0);
    /// # Ok::<(), snowcas::ConfigError>(())
    /// ```
    pub fn with_defaults(node_id: i64, timestamp_offset_ms: i64) -> Result<Self> {
        Self::with_node_id(node_id, timestamp_offset_ms, SystemClock)
    }
}
