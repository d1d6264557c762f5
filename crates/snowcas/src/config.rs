use crate::{
    error::Result,
    generator::SnowflakeGenerator,
    layout::{DEFAULT_NODE_ID_BITS, DEFAULT_SEQUENCE_BITS},
    time::{CUSTOM_EPOCH_MS, TimeSource},
};

/// Plain-data description of a generator.
///
/// Nothing is validated until [`GeneratorConfig::build`]. With the `serde`
/// feature, missing fields fall back to [`GeneratorConfig::default`], so a
/// service can embed this in its own configuration file and only spell out
/// the node id.
///
/// # Example
/// ```
/// use snowcas::{GeneratorConfig, ManualClock};
///
/// let generator = GeneratorConfig::default()
///     .with_node_id(42)
///     .with_timestamp_offset_ms(0)
///     .build(ManualClock::new(1_000))?;
///
/// assert_eq!(generator.node_id(), 42);
/// assert_eq!(generator.config().sequence_bits, 12);
/// # Ok::<(), snowcas::ConfigError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    pub node_id_bits: i32,
    pub sequence_bits: i32,
    pub node_id: i64,
    /// Epoch subtracted from the clock, in Unix milliseconds.
    pub timestamp_offset_ms: i64,
}

impl Default for GeneratorConfig {
    /// 10 node id bits, 12 sequence bits, node 0, [`CUSTOM_EPOCH_MS`].
    fn default() -> Self {
        Self {
            node_id_bits: DEFAULT_NODE_ID_BITS,
            sequence_bits: DEFAULT_SEQUENCE_BITS,
            node_id: 0,
            timestamp_offset_ms: CUSTOM_EPOCH_MS,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub const fn with_node_id_bits(mut self, node_id_bits: i32) -> Self {
        self.node_id_bits = node_id_bits;
        self
    }

    #[must_use]
    pub const fn with_sequence_bits(mut self, sequence_bits: i32) -> Self {
        self.sequence_bits = sequence_bits;
        self
    }

    #[must_use]
    pub const fn with_node_id(mut self, node_id: i64) -> Self {
        self.node_id = node_id;
        self
    }

    #[must_use]
    pub const fn with_timestamp_offset_ms(mut self, timestamp_offset_ms: i64) -> Self {
        self.timestamp_offset_ms = timestamp_offset_ms;
        self
    }

    /// Validates the configuration and creates a generator reading `clock`.
    ///
    /// # Errors
    ///
    /// Same as [`SnowflakeGenerator::new`].
    pub fn build<T: TimeSource>(&self, clock: T) -> Result<SnowflakeGenerator<T>> {
        SnowflakeGenerator::from_config(self, clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigError, ManualClock};

    #[test]
    fn default_matches_convenience_constructor() {
        let clock = ManualClock::new(CUSTOM_EPOCH_MS + 5);
        let built = GeneratorConfig::default().build(clock.clone()).unwrap();
        let direct = SnowflakeGenerator::with_node_id(0, CUSTOM_EPOCH_MS, clock).unwrap();
        assert_eq!(built.config(), direct.config());
        assert_eq!(built.layout(), direct.layout());
    }

    #[test]
    fn config_round_trips_through_generator() {
        let config = GeneratorConfig::default()
            .with_node_id_bits(5)
            .with_sequence_bits(7)
            .with_node_id(31)
            .with_timestamp_offset_ms(100);
        let generator = config.build(ManualClock::new(200)).unwrap();
        assert_eq!(generator.config(), config);
        assert_eq!(generator.max_node_id(), 31);
        assert_eq!(generator.max_sequence(), 127);
    }

    #[test]
    fn build_runs_full_validation() {
        let err = GeneratorConfig::default()
            .with_node_id_bits(4)
            .with_node_id(16)
            .build(ManualClock::new(CUSTOM_EPOCH_MS))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::NodeIdOutOfRange {
                node_id: 16,
                max_node_id: 15,
            }
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_with_defaults() {
        let config: GeneratorConfig = serde_json::from_str(r#"{ "node_id": 9 }"#).unwrap();
        assert_eq!(config, GeneratorConfig::default().with_node_id(9));

        let json = serde_json::to_string(&config).unwrap();
        let back: GeneratorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
