//! ISO-8601 duration (`PnYnMnWnDTnHnMnS`).

use chrono::{DateTime, Days, Months, TimeDelta, TimeZone};

/// A designator-based ISO-8601 duration.
///
/// The calendar part (years, months, weeks, days) has no fixed length and is
/// only meaningful relative to an instant; the clock part (hours, minutes,
/// seconds) is exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IsoDuration {
    pub years: u32,
    pub months: u32,
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    /// Fraction of the seconds component, in nanoseconds.
    pub nanoseconds: u32,
}

impl IsoDuration {
    /// Creates a zero duration.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            years: 0,
            months: 0,
            weeks: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
            nanoseconds: 0,
        }
    }

    /// Returns whether every component is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.weeks == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
            && self.nanoseconds == 0
    }

    /// Returns whether the duration has a calendar part.
    #[must_use]
    pub const fn has_calendar_part(&self) -> bool {
        self.years != 0 || self.months != 0 || self.weeks != 0 || self.days != 0
    }

    /// Returns the exact clock part (hours, minutes, seconds and fraction).
    #[must_use]
    pub fn time_delta(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.hours))
            + TimeDelta::minutes(i64::from(self.minutes))
            + TimeDelta::seconds(i64::from(self.seconds))
            + TimeDelta::nanoseconds(i64::from(self.nanoseconds))
    }

    /// Adds this duration to `at`.
    ///
    /// Years and months are applied first (clamping to the end of shorter
    /// months), then weeks and days, then the clock part. Returns `None` if
    /// the result is out of range.
    #[must_use]
    pub fn add_to<Tz: TimeZone>(&self, at: DateTime<Tz>) -> Option<DateTime<Tz>> {
        let months = self.years.checked_mul(12)?.checked_add(self.months)?;
        let days = u64::from(self.weeks) * 7 + u64::from(self.days);

        at.checked_add_months(Months::new(months))?
            .checked_add_days(Days::new(days))?
            .checked_add_signed(self.time_delta())
    }
}
