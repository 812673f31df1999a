//! Single (non-repeating) interval.

use chrono::{DateTime, FixedOffset};

use super::IsoDuration;

/// An interval described by a duration and an optional start instant.
///
/// Without a start, the interval is anchored at whatever instant the caller
/// measures from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    start: Option<DateTime<FixedOffset>>,
    duration: IsoDuration,
}

impl Interval {
    #[must_use]
    pub const fn new(start: Option<DateTime<FixedOffset>>, duration: IsoDuration) -> Self {
        Self { start, duration }
    }

    /// Creates an interval without a start instant.
    #[must_use]
    pub const fn from_duration(duration: IsoDuration) -> Self {
        Self::new(None, duration)
    }

    #[must_use]
    pub const fn start(&self) -> Option<&DateTime<FixedOffset>> {
        self.start.as_ref()
    }

    #[must_use]
    pub const fn duration(&self) -> &IsoDuration {
        &self.duration
    }

    /// Returns a copy of this interval anchored at `start`.
    #[must_use]
    pub const fn with_start(&self, start: DateTime<FixedOffset>) -> Self {
        Self::new(Some(start), self.duration)
    }

    /// Returns the instant at which the interval ends.
    ///
    /// The interval's own start takes precedence over `from`. Returns `None`
    /// if the end is out of range.
    #[must_use]
    pub fn end_from(&self, from: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        self.duration.add_to(self.start.unwrap_or(from))
    }

    /// Millisecond variant of [`Interval::end_from`], with `from` taken as
    /// milliseconds since the Unix epoch in UTC.
    #[must_use]
    pub fn end_from_millis(&self, from_epoch_millis: i64) -> Option<i64> {
        let from = DateTime::from_timestamp_millis(from_epoch_millis)?.fixed_offset();
        self.end_from(from).map(|end| end.timestamp_millis())
    }
}

impl From<IsoDuration> for Interval {
    fn from(duration: IsoDuration) -> Self {
        Self::from_duration(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn one_hour() -> IsoDuration {
        IsoDuration {
            hours: 1,
            ..IsoDuration::zero()
        }
    }

    #[test]
    fn end_from_uses_given_instant_without_start() {
        let interval = Interval::from(one_hour());
        let end = interval.end_from(at("2024-05-01T08:00:00+02:00")).unwrap();
        assert_eq!(end, at("2024-05-01T09:00:00+02:00"));
    }

    #[test]
    fn end_from_prefers_own_start() {
        let interval = Interval::new(Some(at("2024-01-01T00:00:00Z")), one_hour());
        let end = interval.end_from(at("2030-01-01T00:00:00Z")).unwrap();
        assert_eq!(end, at("2024-01-01T01:00:00Z"));
    }

    #[test]
    fn end_from_millis_adds_duration() {
        let interval = Interval::from_duration(one_hour());
        assert_eq!(interval.end_from_millis(0), Some(3_600_000));
        assert_eq!(interval.end_from_millis(i64::MAX), None);
    }

    #[test]
    fn with_start_keeps_duration() {
        let interval = Interval::from_duration(one_hour());
        let anchored = interval.with_start(at("2024-01-01T00:00:00Z"));
        assert_eq!(anchored.duration(), interval.duration());
        assert_eq!(anchored.start(), Some(&at("2024-01-01T00:00:00Z")));
        assert!(interval.start().is_none());
    }

    #[test]
    fn equality_compares_instants() {
        let utc = Interval::new(Some(at("2024-01-01T00:00:00Z")), one_hour());
        let shifted = Interval::new(Some(at("2024-01-01T01:00:00+01:00")), one_hour());
        assert_eq!(utc, shifted);
    }
}
