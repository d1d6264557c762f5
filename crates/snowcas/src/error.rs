/// A result type defaulting to [`ConfigError`].
///
/// Only construction is fallible. Generation and decomposition never fail.
pub type Result<T, E = ConfigError> = core::result::Result<T, E>;

/// All errors a generator can be rejected with at construction time.
///
/// Validation stops at the first violation, in the order the variants are
/// declared here. A rejected construction never yields a partially initialized
/// generator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A node id or sequence bit width was negative.
    #[error("invalid bit width: {bits}")]
    InvalidBitWidth {
        /// The rejected width.
        bits: i32,
    },

    /// `node_id_bits + sequence_bits` is larger than [`MAX_LAYOUT_BITS`].
    ///
    /// [`MAX_LAYOUT_BITS`]: crate::MAX_LAYOUT_BITS
    #[error("bit budget exceeded: {node_id_bits} + {sequence_bits} > {max_bits}")]
    BitBudgetExceeded {
        /// The requested node id width.
        node_id_bits: i32,
        /// The requested sequence width.
        sequence_bits: i32,
        /// The combined width allowed.
        max_bits: u32,
    },

    /// The node id is negative or does not fit in `node_id_bits`.
    #[error("node id {node_id} out of range 0..={max_node_id}")]
    NodeIdOutOfRange {
        /// The rejected node id.
        node_id: i64,
        /// The largest node id the layout can hold.
        max_node_id: i64,
    },

    /// The timestamp offset was negative.
    #[error("invalid timestamp offset: {offset_ms} ms")]
    InvalidOffset {
        /// The rejected offset.
        offset_ms: i64,
    },

    /// The timestamp offset lies ahead of the clock's reading at construction.
    #[error("timestamp offset {offset_ms} ms is ahead of the clock ({now_ms} ms)")]
    OffsetInFuture {
        /// The rejected offset.
        offset_ms: i64,
        /// The clock's reading when the offset was checked.
        now_ms: i64,
    },
}
