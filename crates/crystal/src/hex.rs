use crate::{CrystalId, Error, Result};

/// Length of the hex form of any [`CrystalId`].
pub const HEX_LEN: usize = 16;

impl CrystalId {
    /// Returns a zeroed, stack-allocated buffer sized for
    /// [`CrystalId::encode_hex_to_buf`].
    #[must_use]
    pub const fn hex_buf() -> [u8; HEX_LEN] {
        [0; HEX_LEN]
    }

    /// Encodes the 8 big-endian bytes as 16 lowercase hex characters.
    ///
    /// # Example
    ///
    /// ```
    /// use crystal::CrystalId;
    ///
    /// assert_eq!(CrystalId::from_i64(42).to_hex(), "000000000000002a");
    /// assert_eq!(CrystalId::MAX.to_hex(), "7fffffffffffffff");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        let mut buf = Self::hex_buf();
        self.encode_hex_to_buf(&mut buf).to_owned()
    }

    /// Encodes into `buf` without allocating and returns a view of it.
    pub fn encode_hex_to_buf<'buf>(&self, buf: &'buf mut [u8; HEX_LEN]) -> &'buf str {
        // The buffer holds exactly two characters per byte, so this cannot fail.
        let _ = ::hex::encode_to_slice(self.to_be_bytes(), &mut buf[..]);
        // SAFETY: `encode_to_slice` writes only ASCII hex digits.
        unsafe { core::str::from_utf8_unchecked(buf) }
    }

    /// Decodes a hex string. Upper- and lowercase digits are both accepted.
    ///
    /// # Errors
    ///
    /// - [`Error::DecodeInvalidChar`] if any character is not a hex digit.
    ///   This is checked first.
    /// - [`Error::DecodeInvalidLen`] if the input does not decode to exactly 8
    ///   bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use crystal::{CrystalId, Error};
    ///
    /// let id = CrystalId::from_hex("000000000000002A").unwrap();
    /// assert_eq!(id.to_i64(), 42);
    ///
    /// assert!(matches!(
    ///     CrystalId::from_hex("zzzz"),
    ///     Err(Error::DecodeInvalidChar { character: 'z', index: 0 })
    /// ));
    /// ```
    pub fn from_hex(s: impl AsRef<str>) -> Result<Self> {
        let s = s.as_ref();
        if let Some((index, character)) = s.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(Error::DecodeInvalidChar { character, index });
        }

        let invalid_len = || Error::DecodeInvalidLen {
            len: s.len(),
            expected: HEX_LEN,
        };
        let bytes = ::hex::decode(s).map_err(|e| match e {
            ::hex::FromHexError::InvalidHexCharacter { c, index } => Error::DecodeInvalidChar {
                character: c,
                index,
            },
            _ => invalid_len(),
        })?;
        let bytes: [u8; 8] = bytes.try_into().map_err(|_| invalid_len())?;
        Ok(Self::from_be_bytes(bytes))
    }
}
