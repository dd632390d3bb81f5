//! Coordination-free, time-sortable 63-bit identifiers.
//!
//! A [`Generator`] packs the milliseconds since a configurable epoch into the
//! high bits of a [`CrystalId`] and a per-millisecond sequence into the low
//! bits. Each time the clock moves to a new millisecond, the sequence restarts
//! at a point derived from a hash of the host name, the process id and fresh
//! randomness. Processes therefore need no coordination to produce distinct
//! identifiers with overwhelming probability.
//!
//! - IDs from one generator strictly increase, even if the wall clock steps
//!   backwards.
//! - IDs from different generators sort by creation time.
//! - Every ID is a non-negative `i64` and has lossless 13 character base32 and
//!   16 character hex forms.
//!
//! ```
//! use crystal::{Config, CrystalGenerator, CrystalId, Generator};
//!
//! let config = Config::default().with_time_bits(44);
//! let generator = Generator::with_config(&config);
//!
//! let id = generator.generate();
//! assert!(id.is_valid());
//! assert_eq!(CrystalId::from_base32(id.to_base32()).unwrap(), id);
//! assert_eq!(CrystalId::from_hex(id.to_hex()).unwrap(), id);
//!
//! // Reading the timestamp back requires the writer's configuration.
//! let _created = config.extract_time(id);
//! ```
//!
//! ## Features
//!
//! - `parking-lot`: use `parking_lot::Mutex` in [`LockCrystalGenerator`].
//! - `cache-padded`: pad generator state to a cache line.
//! - `serde`: `#[serde(with = ...)]` helpers `as_int`, `as_base32` and
//!   `as_hex`.
//! - `tracing`: trace generation steps and log clock rollbacks and randomness
//!   failures.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod base32;
mod config;
mod error;
mod generator;
mod hex;
mod id;
mod rand;
mod seed;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::base32::*;
pub use crate::config::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::hex::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::seed::*;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
