use crate::Layout;

/// Mutable generator state: the last issued timestamp and its sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct State {
    pub(crate) timestamp: u64,
    pub(crate) sequence: u64,
}

pub(crate) enum Step {
    Advance(State),
    Exhausted { yield_for: u64 },
}

impl State {
    pub(crate) const fn new(timestamp: u64, sequence: u64) -> Self {
        Self {
            timestamp,
            sequence,
        }
    }

    /// Bounds the state to what `layout` can represent.
    ///
    /// A timestamp past the end of the field is held at its last value.
    pub(crate) fn fit(self, layout: Layout) -> Self {
        Self::new(
            clamp_timestamp(self.timestamp, layout),
            self.sequence & layout.max_sequence(),
        )
    }

    /// Packs into one word, `(timestamp << S) | sequence`.
    pub(crate) const fn pack(self, layout: Layout) -> u64 {
        (self.timestamp << layout.timestamp_shift()) | (self.sequence & layout.max_sequence())
    }

    pub(crate) const fn unpack(word: u64, layout: Layout) -> Self {
        Self {
            timestamp: word >> layout.timestamp_shift(),
            sequence: word & layout.max_sequence(),
        }
    }

    /// Computes the state that follows `self` at clock reading `now`.
    ///
    /// A later millisecond restarts the sequence at `reseed()`. An earlier
    /// one is treated as the last timestamp. Within the same millisecond the
    /// sequence increments until it is exhausted, in which case the state is
    /// left as is.
    ///
    /// A clock reading past the end of the timestamp field is held at its
    /// last value, so the field stalls instead of wrapping.
    #[inline]
    pub(crate) fn step(self, now: u64, layout: Layout, reseed: impl FnOnce() -> u64) -> Step {
        let now = clamp_timestamp(now, layout);
        if now > self.timestamp {
            return Step::Advance(Self::new(now, reseed()));
        }
        if now < self.timestamp {
            Self::cold_clock_behind(now, self.timestamp);
        }

        if self.sequence < layout.max_sequence() {
            Step::Advance(Self::new(self.timestamp, self.sequence + 1))
        } else {
            #[cfg(feature = "tracing")]
            tracing::trace!(timestamp = self.timestamp, "sequence exhausted");
            Step::Exhausted {
                yield_for: self.timestamp - now + 1,
            }
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: u64, last: u64) {
        debug_assert!(now < last);
        #[cfg(feature = "tracing")]
        tracing::debug!(now, last, "clock moved backwards, pinning to last timestamp");
        #[cfg(not(feature = "tracing"))]
        let _ = (now, last);
    }
}

#[inline]
fn clamp_timestamp(timestamp: u64, layout: Layout) -> u64 {
    let max = layout.max_timestamp();
    if timestamp > max {
        cold_timestamp_overflow(timestamp, max)
    } else {
        timestamp
    }
}

#[cold]
#[inline(never)]
fn cold_timestamp_overflow(timestamp: u64, max: u64) -> u64 {
    #[cfg(feature = "tracing")]
    tracing::warn!(timestamp, max, "timestamp field exhausted, holding at maximum");
    #[cfg(not(feature = "tracing"))]
    let _ = timestamp;
    max
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance(step: Step) -> State {
        match step {
            Step::Advance(state) => state,
            Step::Exhausted { yield_for } => panic!("unexpected exhaustion ({yield_for})"),
        }
    }

    #[test]
    fn new_millisecond_reseeds() {
        let layout = Layout::default();
        let next = advance(State::new(10, 99).step(11, layout, || 3));
        assert_eq!(next, State::new(11, 3));
    }

    #[test]
    fn same_millisecond_increments_without_reseeding() {
        let layout = Layout::default();
        let next = advance(State::new(10, 99).step(10, layout, || panic!("reseeded")));
        assert_eq!(next, State::new(10, 100));
    }

    #[test]
    fn earlier_clock_is_pinned() {
        let layout = Layout::default();
        let next = advance(State::new(10, 99).step(4, layout, || panic!("reseeded")));
        assert_eq!(next, State::new(10, 100));
    }

    #[test]
    fn exhaustion_reports_wait_until_past_last() {
        let layout = Layout::default();
        let full = State::new(10, layout.max_sequence());
        assert!(matches!(
            full.step(10, layout, || 0),
            Step::Exhausted { yield_for: 1 }
        ));
        assert!(matches!(
            full.step(7, layout, || 0),
            Step::Exhausted { yield_for: 4 }
        ));
    }

    #[test]
    fn timestamp_past_field_is_held_at_maximum() {
        let layout = Layout::new(40);
        let max = layout.max_timestamp();
        let fitted = State::new((1 << 41) + 5, layout.max_sequence() + 2).fit(layout);
        assert_eq!(fitted, State::new(max, 1));
        assert_eq!(State::unpack(fitted.pack(layout), layout), fitted);

        let next = advance(fitted.step(1 << 45, layout, || panic!("reseeded")));
        assert_eq!(next, State::new(max, 2));
        assert!(matches!(
            State::new(max, layout.max_sequence()).step(u64::MAX, layout, || 0),
            Step::Exhausted { yield_for: 1 }
        ));
    }

    #[test]
    fn packed_word_orders_like_state() {
        let layout = Layout::new(40);
        let a = State::new(5, layout.max_sequence());
        let b = State::new(6, 0);
        assert!(a.pack(layout) < b.pack(layout));
        assert_eq!(State::unpack(a.pack(layout), layout), a);
        assert_eq!(State::unpack(b.pack(layout), layout), b);
    }
}
