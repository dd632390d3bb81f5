use ::rand::{RngCore, rng};

use crate::RandSource;

/// A [`RandSource`] that uses the thread-local RNG (`rand::rng()`).
///
/// The thread-local generator is ChaCha-based, seeded from the OS and
/// reseeded periodically, so it is cryptographically strong and avoids a
/// system call per draw. It cannot fail.
///
/// This type does **not** store the RNG; it accesses the calling thread's
/// generator on each call, so it may be shared freely across threads.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    type Err = core::convert::Infallible;

    fn try_rand(&self) -> Result<[u8; 32], Self::Err> {
        let mut buf = [0_u8; 32];
        rng().fill_bytes(&mut buf);
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_are_distinct() {
        let a = ThreadRandom.try_rand().unwrap();
        let b = ThreadRandom.try_rand().unwrap();
        assert_ne!(a, b);
    }
}
