/// A result type that defaults to the crate [`Error`].
///
/// Generation is infallible. Only decoding an identifier from one of its
/// textual forms can fail.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `crystal` can emit.
///
/// Decoding is all-or-nothing: a string either yields exactly one
/// [`CrystalId`] or one of these errors, never a partial value.
///
/// [`CrystalId`]: crate::CrystalId
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The input contains a character outside the encoding's alphabet.
    #[error("invalid character {character:?} at index {index}")]
    DecodeInvalidChar {
        /// The offending character.
        character: char,
        /// Byte offset of the character in the input.
        index: usize,
    },

    /// The input does not decode to exactly 8 bytes.
    #[error("invalid length: got {len} characters, expected {expected}")]
    DecodeInvalidLen {
        /// Length of the input in characters.
        len: usize,
        /// Length that decodes to exactly 8 bytes.
        expected: usize,
    },
}
