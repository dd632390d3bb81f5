use core::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

use crate::{Config, RandSource};

/// Host name used for seeding when the real one cannot be read.
pub const UNKNOWN_MACHINE: &str = "unknown";

/// Largest start value for a freshly seeded sequence of `sequence_bits` bits,
/// `2^(S-1) - 1`, or `0` when `S <= 1`.
///
/// Starting in the lower half of the sequence space leaves at least half of it
/// for increments within the same millisecond.
#[must_use]
pub const fn start_sequence_mask(sequence_bits: u8) -> u64 {
    match sequence_bits {
        0 | 1 => 0,
        s if s > 64 => u64::MAX >> 1,
        s => (1_u64 << (s - 1)) - 1,
    }
}

/// The host and process a generator was seeded from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identity {
    machine: String,
    pid: u32,
}

impl Identity {
    pub fn new(machine: impl Into<String>, pid: u32) -> Self {
        Self {
            machine: machine.into(),
            pid,
        }
    }

    /// The current host name and process id.
    ///
    /// Falls back to [`UNKNOWN_MACHINE`] if the host name cannot be read.
    #[must_use]
    pub fn detect() -> Self {
        Self::new(detect_machine(), std::process::id())
    }

    /// Like [`Identity::detect`], with any override set in `config` taking
    /// precedence.
    #[must_use]
    pub fn resolve(config: &Config) -> Self {
        let machine = config
            .machine()
            .map_or_else(detect_machine, str::to_owned);
        let pid = config.pid().unwrap_or_else(std::process::id);
        Self::new(machine, pid)
    }

    #[must_use]
    pub fn machine(&self) -> &str {
        &self.machine
    }

    #[must_use]
    pub const fn pid(&self) -> u32 {
        self.pid
    }

    /// `SHA-256(machine || decimal(pid))`.
    ///
    /// There is no separator, so `("host4", 2)` and `("host", 42)` seed
    /// identically.
    #[must_use]
    pub fn seed(&self) -> Seed {
        let mut hasher = Sha256::new();
        hasher.update(self.machine.as_bytes());
        hasher.update(self.pid.to_string().as_bytes());
        Seed::from_bytes(hasher.finalize().into())
    }
}

fn detect_machine() -> String {
    match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %e, fallback = UNKNOWN_MACHINE, "cannot read host name");
            #[cfg(not(feature = "tracing"))]
            let _ = e;
            UNKNOWN_MACHINE.to_owned()
        }
    }
}

/// A 256-bit per-generator value derived from its [`Identity`].
///
/// The seed never changes after construction. It only diversifies the point at
/// which each millisecond's sequence starts, so that generators on different
/// hosts or processes are unlikely to emit the same values.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed([u8; 32]);

impl Seed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The last 8 bytes, read big-endian.
    #[must_use]
    pub const fn low64(&self) -> u64 {
        let b = &self.0;
        u64::from_be_bytes([b[24], b[25], b[26], b[27], b[28], b[29], b[30], b[31]])
    }

    /// Picks the starting sequence for a new millisecond.
    ///
    /// Hashes the seed together with 256 bits from `rng` and keeps the first
    /// 8 bytes of the digest, masked by
    /// [`start_sequence_mask(sequence_bits)`](start_sequence_mask). If `rng`
    /// fails, mixes the wall clock's nanoseconds with [`Seed::low64`]
    /// instead. The result never exceeds the mask, and is `0` without
    /// touching `rng` when `sequence_bits <= 1`.
    pub fn start_sequence<R>(&self, rng: &R, sequence_bits: u8) -> u64
    where
        R: RandSource + ?Sized,
    {
        let mask = start_sequence_mask(sequence_bits);
        if mask == 0 {
            return 0;
        }

        match rng.try_rand() {
            Ok(random) => {
                let mut hasher = Sha256::new();
                hasher.update(self.0);
                hasher.update(random);
                let digest: [u8; 32] = hasher.finalize().into();
                let mut head = [0_u8; 8];
                head.copy_from_slice(&digest[..8]);
                u64::from_be_bytes(head) & mask
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = ?e, "random source failed, seeding sequence from clock");
                #[cfg(not(feature = "tracing"))]
                let _ = e;
                self.cold_start_sequence(mask)
            }
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_start_sequence(&self, mask: u64) -> u64 {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        (nanos ^ self.low64()) & mask
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Seed").field(&::hex::encode(self.0)).finish()
    }
}
