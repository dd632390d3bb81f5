use core::fmt;

/// A source of 256 random bits.
///
/// Generators draw from it once per millisecond rollover to pick where the
/// sequence starts. A failing source is never fatal: the caller falls back to
/// a clock-and-seed mix (see [`Seed::start_sequence`]).
///
/// # Example
///
/// ```
/// use crystal::RandSource;
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     type Err = core::convert::Infallible;
///
///     fn try_rand(&self) -> Result<[u8; 32], Self::Err> {
///         Ok([7; 32])
///     }
/// }
///
/// assert_eq!(FixedRand.try_rand(), Ok([7; 32]));
/// ```
///
/// [`Seed::start_sequence`]: crate::Seed::start_sequence
pub trait RandSource {
    /// The error returned when no randomness is available.
    type Err: fmt::Debug;

    /// Returns 32 random bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source cannot produce randomness.
    fn try_rand(&self) -> Result<[u8; 32], Self::Err>;
}

impl<R: RandSource + ?Sized> RandSource for &R {
    type Err = R::Err;

    fn try_rand(&self) -> Result<[u8; 32], Self::Err> {
        (**self).try_rand()
    }
}
