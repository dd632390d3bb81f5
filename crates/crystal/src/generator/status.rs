use crate::CrystalId;

/// The outcome of one non-blocking generation step.
///
/// - [`IdGenStatus::Ready`] carries a new identifier.
/// - [`IdGenStatus::Pending`] means the sequence for the current millisecond
///   is used up (or another thread won a race) and the caller should wait
///   about `yield_for` milliseconds before polling again.
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
///         IdGenStatus::Pending { .. } => std::thread::yield_now(),
///     }
/// };
/// assert!(id.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: CrystalId,
    },
    /// No ID could be generated right now.
    Pending {
        /// Milliseconds until the clock passes the generator's last
        /// timestamp. `0` means retry immediately.
        yield_for: u64,
    },
}
