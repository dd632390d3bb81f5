use core::{fmt, str::FromStr, time::Duration};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{Config, Error, Layout};

/// A 63-bit, time-sortable identifier stored in a 64-bit signed container.
///
/// The value packs a millisecond timestamp offset (high bits) and a
/// per-millisecond sequence (low bits) according to a [`Layout`]. The split is
/// not self-describing: decoding the timestamp requires the [`Config`] the
/// identifier was generated with.
///
/// Ordering is numeric, so identifiers from one generator sort in creation
/// order, and identifiers from different generators sort by creation time.
///
/// [`fmt::Display`] and [`FromStr`] use the 13 character base32 form.
///
/// # Example
///
/// ```
/// use crystal::CrystalId;
///
/// let id = CrystalId::from_i64(42);
/// assert_eq!(id.to_i64(), 42);
/// assert_eq!(id.to_string(), "000000000002m");
/// assert_eq!("000000000002m".parse::<CrystalId>().unwrap(), id);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct CrystalId {
    id: i64,
}

impl CrystalId {
    /// The smallest identifier.
    pub const ZERO: Self = Self { id: 0 };

    /// The largest valid identifier, `2^63 - 1`.
    pub const MAX: Self = Self { id: i64::MAX };

    /// Reinterprets a signed 64-bit integer as an identifier. Never fails.
    #[must_use]
    pub const fn from_i64(id: i64) -> Self {
        Self { id }
    }

    /// Returns the identifier as a signed 64-bit integer.
    #[must_use]
    pub const fn to_i64(&self) -> i64 {
        self.id
    }

    /// Reinterprets the raw bit pattern as an identifier.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw as i64 }
    }

    /// Returns the raw bit pattern.
    #[must_use]
    pub const fn to_raw(&self) -> u64 {
        self.id as u64
    }

    /// Returns the 8 big-endian bytes that the string encodings operate on.
    #[must_use]
    pub const fn to_be_bytes(&self) -> [u8; 8] {
        self.id.to_be_bytes()
    }

    /// Builds an identifier from 8 big-endian bytes.
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Self {
            id: i64::from_be_bytes(bytes),
        }
    }

    /// Returns `true` if the reserved top bit is clear.
    ///
    /// Every generated identifier is valid. Values built with
    /// [`Self::from_i64`] or decoded from text may not be.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.id >= 0
    }

    /// Clears the reserved top bit.
    #[must_use]
    pub const fn into_valid(self) -> Self {
        Self {
            id: self.id & i64::MAX,
        }
    }

    /// Timestamp offset in milliseconds since the epoch of `layout`'s owner.
    #[must_use]
    pub const fn timestamp(&self, layout: Layout) -> u64 {
        layout.timestamp(*self)
    }

    /// Sequence component under `layout`.
    #[must_use]
    pub const fn sequence(&self, layout: Layout) -> u64 {
        layout.sequence(*self)
    }

    /// Milliseconds since the Unix epoch at which this identifier was
    /// generated, assuming it was generated with `config`.
    ///
    /// A `config` with a different time width than the writer's silently
    /// yields a wrong value.
    #[must_use]
    pub fn unix_millis(&self, config: &Config) -> u64 {
        (self.to_raw() >> config.layout().timestamp_shift()).saturating_add(config.epoch_millis())
    }

    /// The embedded creation time, see [`Self::unix_millis`].
    #[must_use]
    pub fn time(&self, config: &Config) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.unix_millis(config))
    }
}

impl From<i64> for CrystalId {
    fn from(id: i64) -> Self {
        Self::from_i64(id)
    }
}

impl From<CrystalId> for i64 {
    fn from(id: CrystalId) -> Self {
        id.to_i64()
    }
}

impl fmt::Display for CrystalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Self::base32_buf();
        f.write_str(self.encode_base32_to_buf(&mut buf))
    }
}

impl FromStr for CrystalId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base32(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CRYSTAL_EPOCH;

    #[test]
    fn int64_roundtrip_is_identity() {
        for raw in [0, 1, 42, i64::MAX, -1, i64::MIN] {
            let id = CrystalId::from_i64(raw);
            assert_eq!(id.to_i64(), raw);
            assert_eq!(i64::from(CrystalId::from(raw)), raw);
        }
    }

    #[test]
    fn validity_tracks_reserved_bit() {
        assert!(CrystalId::ZERO.is_valid());
        assert!(CrystalId::MAX.is_valid());

        let id = CrystalId::from_i64(-1);
        assert!(!id.is_valid());
        assert_eq!(id.into_valid(), CrystalId::MAX);
    }

    #[test]
    fn byte_view_is_big_endian() {
        let id = CrystalId::from_i64(0x0102_0304_0506_0708);
        assert_eq!(id.to_be_bytes(), [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(CrystalId::from_be_bytes(id.to_be_bytes()), id);
    }

    #[test]
    fn unix_millis_adds_configured_epoch() {
        let config = Config::default();
        let id = config.layout().compose(1_000, 5);
        assert_eq!(
            id.unix_millis(&config),
            CRYSTAL_EPOCH.as_millis() as u64 + 1_000
        );
        assert_eq!(
            id.time(&config),
            UNIX_EPOCH + CRYSTAL_EPOCH + Duration::from_millis(1_000)
        );
    }

    #[test]
    fn ordering_follows_timestamp_then_sequence() {
        let layout = Layout::default();
        let a = layout.compose(10, layout.max_sequence());
        let b = layout.compose(11, 0);
        let c = layout.compose(11, 1);
        assert!(a < b && b < c);
    }

    #[test]
    fn display_and_from_str_use_base32() {
        let id = CrystalId::from_i64(1);
        assert_eq!(id.to_string(), "0000000000002");
        assert_eq!("0000000000002".parse::<CrystalId>().unwrap(), id);
    }
}
