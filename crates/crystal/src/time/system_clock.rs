use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{CRYSTAL_EPOCH, TimeSource};

/// Wall-clock time source measured from a configurable epoch.
///
/// Reads [`SystemTime::now`] on every call. The value is not monotonic: if the
/// host clock is stepped backwards, so is this clock. Generators absorb that
/// by pinning to the last timestamp they issued.
///
/// Times before the epoch (or before 1970) read as `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemClock {
    epoch: Duration,
}

impl Default for SystemClock {
    /// A clock aligned to [`CRYSTAL_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(CRYSTAL_EPOCH)
    }
}

impl SystemClock {
    /// Creates a clock whose zero point is `epoch`, given as a [`Duration`]
    /// since 1970-01-01 UTC.
    ///
    /// # Example
    ///
    /// ```
    /// use crystal::{SystemClock, TimeSource, TWITTER_EPOCH};
    ///
    /// let clock = SystemClock::with_epoch(TWITTER_EPOCH);
    /// assert!(clock.current_millis() > 0);
    /// ```
    #[must_use]
    pub const fn with_epoch(epoch: Duration) -> Self {
        Self { epoch }
    }

    /// The configured zero point.
    #[must_use]
    pub const fn epoch(&self) -> Duration {
        self.epoch
    }
}

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|now| now.checked_sub(self.epoch))
            .map_or(0, |elapsed| {
                u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
            })
    }
}
