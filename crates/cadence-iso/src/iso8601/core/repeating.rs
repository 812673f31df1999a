//! Repeating interval value (`R[n]/interval`).

use cadence_core::constants::INFINITE;

use super::Interval;

/// An interval repeated a fixed number of times, or without bound.
///
/// `I` is the interval representation produced by the interval parser in
/// use; it is never inspected here. Equality and hashing are structural over
/// the repetition count and the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepeatingInterval<I = Interval> {
    repetitions: i32,
    interval: I,
}

impl<I> RepeatingInterval<I> {
    /// Repetition count meaning "repeat indefinitely".
    pub const INFINITE: i32 = INFINITE;

    #[must_use]
    pub const fn new(repetitions: i32, interval: I) -> Self {
        Self {
            repetitions,
            interval,
        }
    }

    /// Returns the raw repetition count, [`Self::INFINITE`] for unbounded
    /// repetition.
    #[must_use]
    pub const fn repetitions(&self) -> i32 {
        self.repetitions
    }

    #[must_use]
    pub const fn interval(&self) -> &I {
        &self.interval
    }

    #[must_use]
    pub const fn is_infinite(&self) -> bool {
        self.repetitions == INFINITE
    }

    /// Returns the number of repetitions, or `None` when the count is
    /// unbounded (or otherwise negative).
    #[must_use]
    pub fn count(&self) -> Option<u32> {
        u32::try_from(self.repetitions).ok()
    }

    #[must_use]
    pub fn into_interval(self) -> I {
        self.interval
    }
}
