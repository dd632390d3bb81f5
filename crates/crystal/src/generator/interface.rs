use crate::{Config, CrystalId, IdGenStatus, Layout};

/// A generator of strictly increasing [`CrystalId`]s.
///
/// Implementations are safe to share between threads whenever their time and
/// random sources are. Generation never fails: clock rollbacks and randomness
/// failures are absorbed, and the only blocking is the wait for the next
/// millisecond once a millisecond's sequence is used up.
pub trait CrystalGenerator {
    /// The configuration snapshot taken at construction.
    fn config(&self) -> &Config;

    /// Performs one generation step without blocking.
    fn poll_id(&self) -> IdGenStatus;

    fn layout(&self) -> Layout {
        self.config().layout()
    }

    /// Generates the next ID, calling `f(yield_for)` each time the generator
    /// is pending.
    ///
    /// `f` decides how to wait: spin, yield, or sleep for `yield_for`
    /// milliseconds.
    fn next_id(&self, mut f: impl FnMut(u64)) -> CrystalId {
        loop {
            match self.poll_id() {
                IdGenStatus::Ready { id } => break id,
                IdGenStatus::Pending { yield_for } => f(yield_for),
            }
        }
    }

    /// Generates the next ID, yielding the thread while pending.
    ///
    /// Every returned ID is strictly greater than every ID previously
    /// returned by the same generator.
    fn generate(&self) -> CrystalId {
        self.next_id(|_| std::thread::yield_now())
    }
}
