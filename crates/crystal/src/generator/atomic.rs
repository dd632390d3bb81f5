use core::{fmt, time::Duration};

use portable_atomic::{AtomicU64, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use super::state::{State, Step};
use crate::{
    Config, CrystalGenerator, IdGenStatus, Identity, Layout, OsRandom, RandSource, Seed,
    SystemClock, TimeSource,
};

/// A lock-free generator that keeps its state in one atomic word.
///
/// The last timestamp and sequence are packed as `(timestamp << S) |
/// sequence` into an [`AtomicU64`] and advanced with a compare-and-swap. A
/// thread that loses the race gets [`IdGenStatus::Pending`] with
/// `yield_for == 0` and should poll again immediately.
///
/// ## Recommended When
/// - Many threads share one generator and lock handoff dominates
/// - Occasional retries are acceptable
///
/// ## See Also
/// - [`LockCrystalGenerator`]
///
/// [`LockCrystalGenerator`]: crate::LockCrystalGenerator
pub struct AtomicCrystalGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicU64,
    config: Config,
    identity: Identity,
    seed: Seed,
    time: T,
    rng: R,
}

impl AtomicCrystalGenerator<SystemClock, OsRandom> {
    /// Creates a generator with [`Config::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates a generator from `config`, reading the host name and process
    /// id unless `config` overrides them.
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        Self::from_parts(
            config.clone(),
            Identity::resolve(config),
            SystemClock::with_epoch(config.epoch()),
            OsRandom,
        )
    }
}

impl Default for AtomicCrystalGenerator<SystemClock, OsRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> AtomicCrystalGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// Creates a generator from explicit parts.
    ///
    /// `time` must count milliseconds from `config`'s epoch.
    pub fn from_parts(config: Config, identity: Identity, time: T, rng: R) -> Self {
        let seed = identity.seed();
        let timestamp = time.current_millis();
        let sequence = seed.start_sequence(&rng, config.layout().sequence_bits());
        let state = State::new(timestamp, sequence).fit(config.layout());
        Self::with_state(config, identity, seed, state, time, rng)
    }

    /// Creates a generator preloaded with the given last timestamp and
    /// sequence.
    pub fn from_components(
        config: Config,
        identity: Identity,
        timestamp: u64,
        sequence: u64,
        time: T,
        rng: R,
    ) -> Self {
        let seed = identity.seed();
        let state = State::new(timestamp, sequence).fit(config.layout());
        Self::with_state(config, identity, seed, state, time, rng)
    }

    fn with_state(
        config: Config,
        identity: Identity,
        seed: Seed,
        state: State,
        time: T,
        rng: R,
    ) -> Self {
        let initial = state.pack(config.layout());
        Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(AtomicU64::new(initial)),
            #[cfg(not(feature = "cache-padded"))]
            state: AtomicU64::new(initial),
            config,
            identity,
            seed,
            time,
            rng,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.config.layout()
    }

    #[must_use]
    pub const fn epoch(&self) -> Duration {
        self.config.epoch()
    }

    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    #[must_use]
    pub fn machine(&self) -> &str {
        self.identity.machine()
    }

    #[must_use]
    pub const fn pid(&self) -> u32 {
        self.identity.pid()
    }

    #[must_use]
    pub const fn seed(&self) -> &Seed {
        &self.seed
    }

    /// Attempts to generate the next ID without blocking.
    ///
    /// Besides sequence exhaustion, returns [`IdGenStatus::Pending`] with
    /// `yield_for == 0` when another thread advanced the state first.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_id(&self) -> IdGenStatus {
        let layout = self.layout();
        let now = self.time.current_millis();

        let current_raw = self.state.load(Ordering::Relaxed);
        let current = State::unpack(current_raw, layout);
        let next = match current.step(now, layout, || {
            self.seed.start_sequence(&self.rng, layout.sequence_bits())
        }) {
            Step::Advance(next) => next,
            Step::Exhausted { yield_for } => return IdGenStatus::Pending { yield_for },
        };

        if self
            .state
            .compare_exchange(
                current_raw,
                next.pack(layout),
                Ordering::Relaxed,
                Ordering::Relaxed,
            )
            .is_ok()
        {
            IdGenStatus::Ready {
                id: layout.compose(next.timestamp, next.sequence),
            }
        } else {
            // Another thread won the race. Retry immediately.
            IdGenStatus::Pending { yield_for: 0 }
        }
    }
}

impl<T, R> CrystalGenerator for AtomicCrystalGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    fn config(&self) -> &Config {
        self.config()
    }

    fn poll_id(&self) -> IdGenStatus {
        self.poll_id()
    }
}

impl<T, R> fmt::Debug for AtomicCrystalGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicCrystalGenerator")
            .field("config", &self.config)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}
