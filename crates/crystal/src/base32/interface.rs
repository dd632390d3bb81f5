use super::rfc4648::{decode_u64, encode_u64};
use crate::{CrystalId, Result};

/// Length of the base32 form of any [`CrystalId`].
pub const BASE32_LEN: usize = 13;

impl CrystalId {
    /// Returns a zeroed, stack-allocated buffer sized for
    /// [`CrystalId::encode_base32_to_buf`].
    #[must_use]
    pub const fn base32_buf() -> [u8; BASE32_LEN] {
        [0; BASE32_LEN]
    }

    /// Encodes this identifier as 13 base32 characters.
    ///
    /// The alphabet is `0123456789abcdefghjkmnpqrstvwxyz` and there is no
    /// padding. Valid identifiers sort lexicographically in numeric order.
    ///
    /// # Example
    ///
    /// ```
    /// use crystal::CrystalId;
    ///
    /// assert_eq!(CrystalId::ZERO.to_base32(), "0000000000000");
    /// assert_eq!(CrystalId::MAX.to_base32(), "fzzzzzzzzzzzy");
    /// ```
    #[must_use]
    pub fn to_base32(&self) -> String {
        let mut buf = Self::base32_buf();
        self.encode_base32_to_buf(&mut buf).to_owned()
    }

    /// Encodes into `buf` without allocating and returns a view of it.
    ///
    /// See also: [`CrystalId::to_base32`].
    pub fn encode_base32_to_buf<'buf>(&self, buf: &'buf mut [u8; BASE32_LEN]) -> &'buf str {
        encode_u64(self.to_raw(), buf);
        // SAFETY: every byte written by `encode_u64` comes from the ASCII
        // alphabet.
        unsafe { core::str::from_utf8_unchecked(buf) }
    }

    /// Decodes a base32 string produced by [`CrystalId::to_base32`].
    ///
    /// # Errors
    ///
    /// - [`Error::DecodeInvalidChar`] if any character is outside the
    ///   (case-sensitive) alphabet. This is checked first.
    /// - [`Error::DecodeInvalidLen`] if the input is not 13 characters long.
    ///
    /// # Example
    ///
    /// ```
    /// use crystal::{CrystalId, Error};
    ///
    /// let id = CrystalId::from_base32("000000000002m").unwrap();
    /// assert_eq!(id.to_i64(), 42);
    ///
    /// assert!(matches!(
    ///     CrystalId::from_base32("invalid!@#"),
    ///     Err(Error::DecodeInvalidChar { .. })
    /// ));
    /// ```
    ///
    /// [`Error::DecodeInvalidChar`]: crate::Error::DecodeInvalidChar
    /// [`Error::DecodeInvalidLen`]: crate::Error::DecodeInvalidLen
    pub fn from_base32(s: impl AsRef<str>) -> Result<Self> {
        decode_u64(s.as_ref()).map(Self::from_raw)
    }
}
