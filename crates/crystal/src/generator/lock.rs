use core::{fmt, time::Duration};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[cfg(not(feature = "parking-lot"))]
use super::mutex::PoisonError;
use super::{
    mutex::{Mutex, MutexGuard},
    state::{State, Step},
};
use crate::{
    Config, CrystalGenerator, IdGenStatus, Identity, Layout, OsRandom, RandSource, Seed,
    SystemClock, TimeSource,
};

/// The default generator: lock-based, wall clock, OS randomness.
///
/// # Example
///
/// ```
/// use crystal::{CrystalGenerator, Generator};
///
/// let generator = Generator::new();
/// let a = generator.generate();
/// let b = generator.generate();
/// assert!(a < b);
/// ```
pub type Generator = LockCrystalGenerator<SystemClock, OsRandom>;

/// A lock-based generator suitable for multi-threaded environments.
///
/// The last timestamp and sequence live behind one mutex (`std::sync::Mutex`,
/// or `parking_lot::Mutex` with the `parking-lot` feature), so every step is a
/// short critical section. A poisoned `std` mutex is recovered: the state is
/// two integers written together and is never left half-updated.
///
/// ## Recommended When
/// - Fair access across threads is important
/// - Your target doesn't support 64-bit atomics
///
/// ## See Also
/// - [`AtomicCrystalGenerator`]
///
/// [`AtomicCrystalGenerator`]: crate::AtomicCrystalGenerator
pub struct LockCrystalGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<Mutex<State>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Mutex<State>,
    config: Config,
    identity: Identity,
    seed: Seed,
    time: T,
    rng: R,
}

impl LockCrystalGenerator<SystemClock, OsRandom> {
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

impl Default for LockCrystalGenerator<SystemClock, OsRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> LockCrystalGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// Creates a generator from explicit parts.
    ///
    /// `time` must count milliseconds from `config`'s epoch. The initial
    /// state is the current reading of `time` and a freshly seeded sequence.
    pub fn from_parts(config: Config, identity: Identity, time: T, rng: R) -> Self {
        let seed = identity.seed();
        let timestamp = time.current_millis();
        let sequence = seed.start_sequence(&rng, config.layout().sequence_bits());
        let state = State::new(timestamp, sequence).fit(config.layout());
        Self::with_state(config, identity, seed, state, time, rng)
    }

    /// Creates a generator preloaded with the given last timestamp and
    /// sequence.
    ///
    /// Mostly useful in tests. Prefer [`Self::from_parts`].
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
        Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(Mutex::new(state)),
            #[cfg(not(feature = "cache-padded"))]
            state: Mutex::new(state),
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

    /// Host name the seed was derived from.
    #[must_use]
    pub fn machine(&self) -> &str {
        self.identity.machine()
    }

    /// Process id the seed was derived from.
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
    /// Returns [`IdGenStatus::Pending`] with the number of milliseconds to
    /// wait when the current millisecond's sequence is used up.
    ///
    /// # Example
    ///
    /// ```
    /// use crystal::{Generator, IdGenStatus};
    ///
    /// let generator = Generator::new();
    /// let id = loop {
    ///     match generator.poll_id() {
    ///         IdGenStatus::Ready { id } => break id,
    ///         IdGenStatus::Pending { yield_for } => {
    ///             std::thread::sleep(core::time::Duration::from_millis(yield_for));
    ///         }
    ///     }
    /// };
    /// assert!(id.is_valid());
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_id(&self) -> IdGenStatus {
        let layout = self.layout();
        let now = self.time.current_millis();

        let mut state = self.lock();
        let step = state.step(now, layout, || {
            self.seed.start_sequence(&self.rng, layout.sequence_bits())
        });
        match step {
            Step::Advance(next) => {
                *state = next;
                IdGenStatus::Ready {
                    id: layout.compose(next.timestamp, next.sequence),
                }
            }
            Step::Exhausted { yield_for } => IdGenStatus::Pending { yield_for },
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        #[cfg(feature = "parking-lot")]
        {
            self.state.lock()
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }
}

impl<T, R> CrystalGenerator for LockCrystalGenerator<T, R>
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

impl<T, R> fmt::Debug for LockCrystalGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockCrystalGenerator")
            .field("config", &self.config)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}
