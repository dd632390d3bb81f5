use core::time::Duration;

/// Default epoch: Wednesday, January 1, 2020 00:00:00 UTC
pub const CRYSTAL_EPOCH: Duration = Duration::from_millis(1_577_836_800_000);

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: Duration = Duration::from_millis(1_288_834_974_657);

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH: Duration = Duration::from_millis(1_420_070_400_000);

/// A source of epoch-relative wall-clock time in milliseconds.
///
/// Generators read the clock once per step. Plug in [`SystemClock`] for real
/// use or a fixed/stepping clock in tests.
///
/// # Example
///
/// ```
/// use crystal::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 1234);
/// ```
///
/// [`SystemClock`]: crate::SystemClock
pub trait TimeSource {
    /// Returns the number of milliseconds since the configured epoch.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}
