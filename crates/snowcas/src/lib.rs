//! Lock-free Snowflake ID generation.
//!
//! A [`SnowflakeGenerator`] packs a millisecond timestamp, a node id and a
//! per-millisecond sequence into a positive `i64`. All callers share a single
//! atomic state word advanced by compare-and-swap, so one generator can be
//! used from any number of threads without locks.
//!
//! ```
//! use std::{collections::HashSet, sync::Arc, thread};
//!
//! use snowcas::{CUSTOM_EPOCH_MS, MonotonicClock, SnowflakeGenerator};
//!
//! let generator = Arc::new(SnowflakeGenerator::with_node_id(
//!     7,
//!     CUSTOM_EPOCH_MS,
//!     MonotonicClock::new(),
//! )?);
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let generator = Arc::clone(&generator);
//!         thread::spawn(move || (0..100).map(|_| generator.next_id()).collect::<Vec<_>>())
//!     })
//!     .collect();
//!
//! let mut seen = HashSet::new();
//! for handle in handles {
//!     for id in handle.join().unwrap() {
//!         assert_eq!(generator.extract_node_id(id), 7);
//!         assert!(seen.insert(id));
//!     }
//! }
//! assert_eq!(seen.len(), 400);
//! # Ok::<(), snowcas::ConfigError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod error;
#[cfg(feature = "async")]
mod futures;
mod generator;
mod layout;
mod time;

pub use crate::config::*;
pub use crate::error::*;
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
#[cfg(feature = "async")]
pub use crate::futures::*;
pub use crate::generator::*;
pub use crate::layout::*;
pub use crate::time::*;
