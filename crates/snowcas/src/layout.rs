//! Bit layout of a Snowflake ID.
//!
//! IDs are packed from **MSB to LSB**; the sign bit is never set:
//!
//! ```text
//!  Bit Index:  63   62                                               0
//!              +---+--------------------+---------------+------------+
//!  Field:      | 0 | timestamp (41)     | node id (N)   | seq (S)    |
//!              +---+--------------------+---------------+------------+
//!                                        |<-- N + S <= 22 bits ----->|
//! ```
//!
//! The timestamp is measured in milliseconds since the generator's timestamp
//! offset, not since the Unix epoch.

use crate::error::{ConfigError, Result};

/// Combined width available to the node id and sequence fields.
pub const MAX_LAYOUT_BITS: u32 = 22;

/// Width budgeted for the timestamp field.
pub const TIMESTAMP_BITS: u32 = 41;

/// Node id width used by the convenience constructors.
pub const DEFAULT_NODE_ID_BITS: i32 = 10;

/// Sequence width used by the convenience constructors.
pub const DEFAULT_SEQUENCE_BITS: i32 = 12;

/// A validated, frozen bit layout.
///
/// All derived constants are computed once in [`Layout::new`]. Decoding an ID
/// with a layout other than the one it was produced under never fails, but the
/// values it returns are meaningless.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    node_id_bits: u32,
    sequence_bits: u32,
    shift: u32,
    max_node_id: i64,
    max_sequence: i64,
}

impl Default for Layout {
    /// 10 node id bits, 12 sequence bits.
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Layout {
    /// The classic 41 / 10 / 12 layout.
    pub const DEFAULT: Self =
        Self::from_widths(DEFAULT_NODE_ID_BITS as u32, DEFAULT_SEQUENCE_BITS as u32);

    /// Validates the bit widths and freezes the derived constants.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidBitWidth`] if either width is negative,
    ///   checking `node_id_bits` first
    /// - [`ConfigError::BitBudgetExceeded`] if the widths sum past
    ///   [`MAX_LAYOUT_BITS`]
    ///
    /// # Example
    /// ```
    /// use snowcas::{ConfigError, Layout};
    ///
    /// let layout = Layout::new(8, 14).unwrap();
    /// assert_eq!(layout.max_node_id(), 255);
    /// assert_eq!(layout.max_sequence(), 16_383);
    ///
    /// assert!(matches!(
    ///     Layout::new(15, 10),
    ///     Err(ConfigError::BitBudgetExceeded { .. })
    /// ));
    /// ```
    pub fn new(node_id_bits: i32, sequence_bits: i32) -> Result<Self> {
        let node_bits =
            u32::try_from(node_id_bits).map_err(|_| ConfigError::InvalidBitWidth {
                bits: node_id_bits,
            })?;
        let seq_bits =
            u32::try_from(sequence_bits).map_err(|_| ConfigError::InvalidBitWidth {
                bits: sequence_bits,
            })?;

        if u64::from(node_bits) + u64::from(seq_bits) > u64::from(MAX_LAYOUT_BITS) {
            return Err(ConfigError::BitBudgetExceeded {
                node_id_bits,
                sequence_bits,
                max_bits: MAX_LAYOUT_BITS,
            });
        }

        Ok(Self::from_widths(node_bits, seq_bits))
    }

    // Callers must have checked the budget.
    const fn from_widths(node_id_bits: u32, sequence_bits: u32) -> Self {
        Self {
            node_id_bits,
            sequence_bits,
            shift: node_id_bits + sequence_bits,
            max_node_id: (1 << node_id_bits) - 1,
            max_sequence: (1 << sequence_bits) - 1,
        }
    }

    /// Checks that `node_id` fits in this layout's node id field.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NodeIdOutOfRange`] if `node_id` is negative or larger
    /// than [`Layout::max_node_id`].
    pub const fn validate_node_id(&self, node_id: i64) -> Result<()> {
        if node_id < 0 || node_id > self.max_node_id {
            return Err(ConfigError::NodeIdOutOfRange {
                node_id,
                max_node_id: self.max_node_id,
            });
        }
        Ok(())
    }

    pub const fn node_id_bits(&self) -> u32 {
        self.node_id_bits
    }

    pub const fn sequence_bits(&self) -> u32 {
        self.sequence_bits
    }

    /// Position of the lowest timestamp bit, `node_id_bits + sequence_bits`.
    pub const fn shift(&self) -> u32 {
        self.shift
    }

    /// `2^node_id_bits - 1`
    pub const fn max_node_id(&self) -> i64 {
        self.max_node_id
    }

    /// `2^sequence_bits - 1`
    pub const fn max_sequence(&self) -> i64 {
        self.max_sequence
    }

    /// Largest timestamp the 41-bit budget can hold.
    pub const fn max_timestamp(&self) -> i64 {
        (1 << TIMESTAMP_BITS) - 1
    }

    /// The node id shifted into place, ready to be OR'd into a packed state.
    pub const fn node_component(&self, node_id: i64) -> i64 {
        (node_id & self.max_node_id) << self.sequence_bits
    }

    /// Milliseconds since the timestamp offset.
    pub const fn extract_timestamp(&self, id: i64) -> i64 {
        id >> self.shift
    }

    pub const fn extract_node_id(&self, id: i64) -> i64 {
        (id >> self.sequence_bits) & self.max_node_id
    }

    pub const fn extract_sequence(&self, id: i64) -> i64 {
        id & self.max_sequence
    }

    /// Packs the three fields into an ID.
    ///
    /// The node id and sequence are masked to their widths. The timestamp is
    /// not masked; it is the caller's job to keep it within
    /// [`Layout::max_timestamp`].
    pub const fn compose(&self, timestamp: i64, node_id: i64, sequence: i64) -> i64 {
        (timestamp << self.shift) | self.node_component(node_id) | (sequence & self.max_sequence)
    }

    /// Splits an ID into its fields.
    pub const fn decompose(&self, id: i64) -> SnowflakeParts {
        SnowflakeParts {
            timestamp: self.extract_timestamp(id),
            node_id: self.extract_node_id(id),
            sequence: self.extract_sequence(id),
        }
    }
}

/// The decoded fields of a Snowflake ID.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnowflakeParts {
    /// Milliseconds since the generator's timestamp offset.
    pub timestamp: i64,
    pub node_id: i64,
    pub sequence: i64,
}

impl SnowflakeParts {
    /// Recovers wall-clock milliseconds since the Unix epoch, given the offset
    /// the ID was generated with.
    pub const fn unix_millis(&self, timestamp_offset_ms: i64) -> i64 {
        self.timestamp.saturating_add(timestamp_offset_ms)
    }
}
