use core::time::Duration;
use std::time::SystemTime;

use crate::{CRYSTAL_EPOCH, CrystalId, Layout};

/// Generator configuration.
///
/// A generator copies its configuration at construction and never observes
/// later changes. Readers that decode timestamps must use a configuration with
/// the same epoch and time width as the writer.
///
/// # Example
///
/// ```
/// use crystal::{Config, MAX_TIME_BITS};
///
/// let config = Config::default()
///     .with_epoch_millis(1_420_070_400_000)
///     .with_time_bits(64)
///     .with_machine("worker-7");
///
/// assert_eq!(config.epoch_millis(), 1_420_070_400_000);
/// assert_eq!(config.time_bits(), MAX_TIME_BITS);
/// assert_eq!(config.machine(), Some("worker-7"));
/// assert_eq!(config.pid(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    epoch: Duration,
    layout: Layout,
    machine: Option<String>,
    pid: Option<u32>,
}

impl Default for Config {
    /// [`CRYSTAL_EPOCH`], 42 time bits, host name and process id detected at
    /// construction.
    fn default() -> Self {
        Self {
            epoch: CRYSTAL_EPOCH,
            layout: Layout::default(),
            machine: None,
            pid: None,
        }
    }
}

impl Config {
    /// Same as [`Config::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the zero point of the timestamp field, as a [`Duration`] since
    /// 1970-01-01 UTC.
    #[must_use]
    pub fn with_epoch(mut self, epoch: Duration) -> Self {
        self.epoch = epoch;
        self
    }

    /// Sets the epoch in Unix milliseconds.
    #[must_use]
    pub fn with_epoch_millis(self, millis: u64) -> Self {
        self.with_epoch(Duration::from_millis(millis))
    }

    /// Sets the timestamp width. Out-of-range values are clamped to
    /// [`MIN_TIME_BITS`]..=[`MAX_TIME_BITS`].
    ///
    /// [`MIN_TIME_BITS`]: crate::MIN_TIME_BITS
    /// [`MAX_TIME_BITS`]: crate::MAX_TIME_BITS
    #[must_use]
    pub fn with_time_bits(mut self, time_bits: u32) -> Self {
        self.layout = Layout::new(time_bits);
        self
    }

    /// Overrides the host name used to derive the generator seed.
    #[must_use]
    pub fn with_machine(mut self, machine: impl Into<String>) -> Self {
        self.machine = Some(machine.into());
        self
    }

    /// Overrides the process id used to derive the generator seed.
    #[must_use]
    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }

    #[must_use]
    pub const fn epoch(&self) -> Duration {
        self.epoch
    }

    /// Epoch in Unix milliseconds, saturating at `u64::MAX`.
    #[must_use]
    pub fn epoch_millis(&self) -> u64 {
        u64::try_from(self.epoch.as_millis()).unwrap_or(u64::MAX)
    }

    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    #[must_use]
    pub const fn time_bits(&self) -> u8 {
        self.layout.time_bits()
    }

    #[must_use]
    pub fn machine(&self) -> Option<&str> {
        self.machine.as_deref()
    }

    #[must_use]
    pub const fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Creation time embedded in `id`, assuming it was generated under this
    /// configuration.
    ///
    /// See [`CrystalId::unix_millis`].
    #[must_use]
    pub fn extract_time(&self, id: CrystalId) -> SystemTime {
        id.time(self)
    }
}
