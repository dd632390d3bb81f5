use ::rand::{TryRngCore, rngs::OsRng};

use crate::RandSource;

/// A [`RandSource`] backed by the operating system's CSPRNG.
///
/// Every call is a system call. This is the default source of [`Generator`]
/// since rollovers happen at most once per millisecond.
///
/// [`Generator`]: crate::Generator
#[derive(Default, Clone, Copy, Debug)]
pub struct OsRandom;

impl RandSource for OsRandom {
    type Err = <OsRng as TryRngCore>::Error;

    fn try_rand(&self) -> Result<[u8; 32], Self::Err> {
        let mut buf = [0_u8; 32];
        OsRng.try_fill_bytes(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_are_distinct() {
        let a = OsRandom.try_rand().unwrap();
        let b = OsRandom.try_rand().unwrap();
        assert_ne!(a, b);
    }
}
