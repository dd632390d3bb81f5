use crate::CrystalId;

/// Usable bits in a [`CrystalId`]. The top bit of the 64-bit container is
/// reserved so every generated value is a non-negative `i64`.
pub const TOTAL_BITS: u8 = 63;

/// Smallest accepted timestamp width.
pub const MIN_TIME_BITS: u8 = 40;

/// Largest accepted timestamp width.
pub const MAX_TIME_BITS: u8 = 48;

/// Timestamp width used when none is configured (21 sequence bits remain).
pub const DEFAULT_TIME_BITS: u8 = 42;

/// The bit split between the timestamp and the sequence of a [`CrystalId`].
///
/// The identifier is packed from **MSB to LSB**:
///
/// ```text
///  Bit Index:  63        62 .. S              S-1 .. 0
///              +--------+--------------------+------------+
///  Field:      | 0      | timestamp (T bits) | seq (S)    |
///              +--------+--------------------+------------+
/// ```
///
/// `T` is clamped to [`MIN_TIME_BITS`]..=[`MAX_TIME_BITS`] on construction and
/// `S = 63 - T`. The split is not stored in the identifier itself, so a reader
/// must use the same layout the writer used.
///
/// # Example
///
/// ```
/// use crystal::{Layout, MAX_TIME_BITS};
///
/// let layout = Layout::new(100);
/// assert_eq!(layout.time_bits(), MAX_TIME_BITS);
/// assert_eq!(layout.sequence_bits(), 15);
///
/// let id = layout.compose(1_000, 7);
/// assert_eq!(layout.timestamp(id), 1_000);
/// assert_eq!(layout.sequence(id), 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Layout {
    time_bits: u8,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(u32::from(DEFAULT_TIME_BITS))
    }
}

impl Layout {
    /// Creates a layout with `time_bits` clamped to the accepted range.
    #[must_use]
    pub const fn new(time_bits: u32) -> Self {
        let time_bits = if time_bits < MIN_TIME_BITS as u32 {
            MIN_TIME_BITS
        } else if time_bits > MAX_TIME_BITS as u32 {
            MAX_TIME_BITS
        } else {
            time_bits as u8
        };
        Self { time_bits }
    }

    /// Width of the timestamp field.
    #[must_use]
    pub const fn time_bits(&self) -> u8 {
        self.time_bits
    }

    /// Width of the sequence field, `63 - time_bits`.
    #[must_use]
    pub const fn sequence_bits(&self) -> u8 {
        TOTAL_BITS - self.time_bits
    }

    /// Shift applied to the timestamp when packing.
    #[must_use]
    pub const fn timestamp_shift(&self) -> u8 {
        self.sequence_bits()
    }

    /// Largest representable sequence value, `2^S - 1`.
    #[must_use]
    pub const fn max_sequence(&self) -> u64 {
        (1_u64 << self.sequence_bits()) - 1
    }

    /// Largest representable timestamp offset, `2^T - 1`.
    #[must_use]
    pub const fn max_timestamp(&self) -> u64 {
        (1_u64 << self.time_bits) - 1
    }

    /// Largest value a freshly seeded sequence may start at.
    ///
    /// See [`start_sequence_mask`](crate::start_sequence_mask).
    #[must_use]
    pub const fn max_start_sequence(&self) -> u64 {
        crate::start_sequence_mask(self.sequence_bits())
    }

    /// Packs a timestamp offset and a sequence into an identifier. Both
    /// components are masked to their field widths.
    #[must_use]
    pub const fn compose(&self, timestamp: u64, sequence: u64) -> CrystalId {
        let t = (timestamp & self.max_timestamp()) << self.timestamp_shift();
        let s = sequence & self.max_sequence();
        CrystalId::from_raw(t | s)
    }

    /// Extracts the timestamp offset (milliseconds since the epoch).
    #[must_use]
    pub const fn timestamp(&self, id: CrystalId) -> u64 {
        (id.to_raw() >> self.timestamp_shift()) & self.max_timestamp()
    }

    /// Extracts the sequence.
    #[must_use]
    pub const fn sequence(&self, id: CrystalId) -> u64 {
        id.to_raw() & self.max_sequence()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_splits_42_21() {
        let layout = Layout::default();
        assert_eq!(layout.time_bits(), 42);
        assert_eq!(layout.sequence_bits(), 21);
        assert_eq!(layout.max_sequence(), (1 << 21) - 1);
        assert_eq!(layout.max_start_sequence(), (1 << 20) - 1);
    }

    #[test]
    fn time_bits_are_clamped() {
        assert_eq!(Layout::new(0).time_bits(), MIN_TIME_BITS);
        assert_eq!(Layout::new(39).time_bits(), MIN_TIME_BITS);
        assert_eq!(Layout::new(40).time_bits(), 40);
        assert_eq!(Layout::new(48).time_bits(), 48);
        assert_eq!(Layout::new(49).time_bits(), MAX_TIME_BITS);
        assert_eq!(Layout::new(100).time_bits(), MAX_TIME_BITS);
        assert_eq!(Layout::new(u32::MAX).time_bits(), MAX_TIME_BITS);
    }

    #[test]
    fn narrowest_time_field_leaves_23_sequence_bits() {
        let layout = Layout::new(40);
        assert_eq!(layout.sequence_bits(), 23);
        assert_eq!(layout.max_sequence(), (1 << 23) - 1);
    }

    #[test]
    fn compose_and_extract_fields() {
        let layout = Layout::default();
        let id = layout.compose(123_456_789, 42);
        assert_eq!(id.to_raw(), (123_456_789 << 21) | 42);
        assert_eq!(layout.timestamp(id), 123_456_789);
        assert_eq!(layout.sequence(id), 42);
    }

    #[test]
    fn compose_masks_out_of_range_components() {
        let layout = Layout::default();
        let id = layout.compose(u64::MAX, u64::MAX);
        assert!(id.is_valid());
        assert_eq!(id, CrystalId::MAX);
        assert_eq!(layout.timestamp(id), layout.max_timestamp());
        assert_eq!(layout.sequence(id), layout.max_sequence());
    }

    #[test]
    fn layouts_disagree_on_foreign_ids() {
        let writer = Layout::new(42);
        let reader = Layout::new(48);
        let id = writer.compose(1_000, 0);
        assert_ne!(reader.timestamp(id), 1_000);
    }
}
