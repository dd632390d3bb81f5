use crate::{BASE32_LEN, Error, Result};

/// Digits then lowercase letters, without `i`, `l`, `o` and `u`.
const ALPHABET: &[u8; 32] = b"0123456789abcdefghjkmnpqrstvwxyz";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;

/// Zero bits appended after the 64 input bits to fill the last character.
const PAD_BITS: usize = BASE32_LEN * BITS_PER_CHAR - 64;

/// Lookup table for decoding. Only the exact (lowercase) alphabet maps to a
/// value; there are no case folds or aliases.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 32 {
        lut[ALPHABET[i as usize] as usize] = i;
        i += 1;
    }
    lut
};

/// Encodes `raw` as 13 base32 characters.
///
/// Bits are consumed from the most significant end in groups of five, and the
/// final group is padded with one zero bit on the right (RFC 4648 bit order).
/// Equal-length encodings therefore sort in the same order as their values.
#[inline]
pub(crate) fn encode_u64(raw: u64, buf: &mut [u8; BASE32_LEN]) {
    let acc = u128::from(raw) << PAD_BITS;
    for (i, out) in buf.iter_mut().enumerate() {
        let shift = (BASE32_LEN - 1 - i) * BITS_PER_CHAR;
        *out = ALPHABET[((acc >> shift) & 0x1F) as usize];
    }
}

/// Decodes a 13 character base32 string produced by [`encode_u64`].
///
/// Every character is checked against the alphabet before the length is
/// checked. The trailing pad bit is discarded.
pub(crate) fn decode_u64(encoded: &str) -> Result<u64> {
    let mut acc = 0_u128;
    for (index, character) in encoded.char_indices() {
        let val = if character.is_ascii() {
            LOOKUP[character as usize]
        } else {
            NO_VALUE
        };
        if val == NO_VALUE {
            return Err(Error::DecodeInvalidChar { character, index });
        }
        acc = (acc << BITS_PER_CHAR) | u128::from(val);
    }

    // All characters are ASCII at this point, so bytes == characters.
    if encoded.len() != BASE32_LEN {
        return Err(Error::DecodeInvalidLen {
            len: encoded.len(),
            expected: BASE32_LEN,
        });
    }

    Ok((acc >> PAD_BITS) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(raw: u64) -> String {
        let mut buf = [0_u8; BASE32_LEN];
        encode_u64(raw, &mut buf);
        String::from_utf8(buf.to_vec()).unwrap()
    }

    #[test]
    fn known_vectors() {
        assert_eq!(encode(0), "0000000000000");
        assert_eq!(encode(1), "0000000000002");
        assert_eq!(encode(42), "000000000002m");
        assert_eq!(encode(i64::MAX as u64), "fzzzzzzzzzzzy");
        assert_eq!(encode(u64::MAX), "zzzzzzzzzzzzy");
    }

    #[test]
    fn decode_reverses_encode() {
        for raw in [
            0,
            1,
            42,
            0x1234_5678_9ABC_DEF0,
            0x7FFF_0000_FFFF_0000,
            i64::MAX as u64,
            u64::MAX,
        ] {
            assert_eq!(decode_u64(&encode(raw)).unwrap(), raw);
        }
    }

    #[test]
    fn decode_ignores_trailing_pad_bit() {
        assert_eq!(decode_u64("0000000000003").unwrap(), 1);
    }

    #[test]
    fn encoding_preserves_order() {
        let values = [0, 1, 31, 32, 1 << 21, (1 << 21) + 1, 1 << 40, i64::MAX as u64];
        for pair in values.windows(2) {
            assert!(encode(pair[0]) < encode(pair[1]));
        }
    }

    #[test]
    fn decode_rejects_characters_outside_alphabet() {
        for (input, character, index) in [
            ("000000000000i", 'i', 12),
            ("l000000000000", 'l', 0),
            ("000000o000000", 'o', 6),
            ("0000u00000000", 'u', 4),
            ("00000000000A0", 'A', 11),
            ("000000000000!", '!', 12),
        ] {
            assert_eq!(
                decode_u64(input).unwrap_err(),
                Error::DecodeInvalidChar { character, index }
            );
        }
    }

    #[test]
    fn decode_reports_byte_index_of_non_ascii() {
        assert_eq!(
            decode_u64("00é").unwrap_err(),
            Error::DecodeInvalidChar {
                character: 'é',
                index: 2
            }
        );
    }

    #[test]
    fn decode_checks_alphabet_before_length() {
        assert_eq!(
            decode_u64("invalid!@#").unwrap_err(),
            Error::DecodeInvalidChar {
                character: 'i',
                index: 0
            }
        );
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert_eq!(
            decode_u64("000000000000").unwrap_err(),
            Error::DecodeInvalidLen {
                len: 12,
                expected: BASE32_LEN
            }
        );
        assert_eq!(
            decode_u64("00000000000000").unwrap_err(),
            Error::DecodeInvalidLen {
                len: 14,
                expected: BASE32_LEN
            }
        );
        assert_eq!(
            decode_u64("").unwrap_err(),
            Error::DecodeInvalidLen {
                len: 0,
                expected: BASE32_LEN
            }
        );
    }
}
