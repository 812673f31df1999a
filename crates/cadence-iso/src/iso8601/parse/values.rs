//! Value parsers for the interval body (ISO 8601 durations and date-times).

use chrono::{DateTime, FixedOffset};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::iso8601::core::IsoDuration;

/// Leading character of a duration.
const DURATION_MARKER: char = 'P';

/// Separates the date and time parts of a duration.
const TIME_DESIGNATOR: char = 'T';

/// Decimal signs accepted in a fractional seconds component.
const DECIMAL_SIGNS: [char; 2] = ['.', ','];

#[derive(Debug, Clone, Copy)]
enum DurationUnit {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

/// Date part designators, in the order they must appear.
const DATE_UNITS: [(char, DurationUnit); 4] = [
    ('Y', DurationUnit::Years),
    ('M', DurationUnit::Months),
    ('W', DurationUnit::Weeks),
    ('D', DurationUnit::Days),
];

/// Time part designators, in the order they must appear.
const TIME_UNITS: [(char, DurationUnit); 3] = [
    ('H', DurationUnit::Hours),
    ('M', DurationUnit::Minutes),
    ('S', DurationUnit::Seconds),
];

/// Parses a duration value.
///
/// Format: `P[nY][nM][nW][nD][T[nH][nM][nS]]` (e.g., "PT1H", "P1Y2M10DT2H30M")
///
/// At least one component is required, and a `T` must be followed by at
/// least one time component. Only the seconds component may carry a
/// fraction (`PT1.5S`, `PT0,25S`), with at most nine fractional digits.
///
/// ## Errors
/// Returns an error if the string is not a valid duration.
pub fn parse_duration(s: &str) -> ParseResult<IsoDuration> {
    if s.is_empty() {
        return Err(ParseError::empty());
    }

    let Some(body) = s.strip_prefix(DURATION_MARKER) else {
        return Err(ParseError::invalid_duration(0, "duration must start with P"));
    };

    let (date_part, time_part) = match body.split_once(TIME_DESIGNATOR) {
        Some((date, time)) => (date, Some(time)),
        None => (body, None),
    };

    let mut dur = IsoDuration::zero();
    let mut components = parse_duration_section(date_part, 1, &DATE_UNITS, &mut dur)?;

    if let Some(time) = time_part {
        let time_offset = 1 + date_part.len() + 1;
        let time_components = parse_duration_section(time, time_offset, &TIME_UNITS, &mut dur)?;
        if time_components == 0 {
            return Err(ParseError::invalid_duration(
                time_offset - 1,
                "time designator must be followed by a component",
            ));
        }
        components += time_components;
    }

    if components == 0 {
        return Err(ParseError::invalid_duration(0, "duration has no components"));
    }

    Ok(dur)
}

/// Parses the `nX` components of one duration section into `dur`.
///
/// Returns how many components were found. `offset` is the position of the
/// section within the full duration text, used for error reporting.
fn parse_duration_section(
    section: &str,
    offset: usize,
    units: &[(char, DurationUnit)],
    dur: &mut IsoDuration,
) -> ParseResult<usize> {
    let mut components = 0;
    let mut next_unit = 0;
    let mut num_start = 0;

    for (i, c) in section.char_indices() {
        if c.is_ascii_digit() || DECIMAL_SIGNS.contains(&c) {
            continue;
        }

        let Some(found) = units[next_unit..].iter().position(|(d, _)| *d == c) else {
            return Err(ParseError::unexpected(offset + i, c));
        };

        let digits = &section[num_start..i];
        if digits.is_empty() {
            return Err(ParseError::invalid_duration(
                offset + i,
                format!("missing value before '{c}'"),
            ));
        }

        let unit = units[next_unit + found].1;
        let (whole, fraction) = match digits.split_once(DECIMAL_SIGNS) {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (digits, None),
        };

        let value = whole.parse::<u32>().map_err(|err| {
            ParseError::invalid_duration(offset + num_start, format!("{digits}: {err}"))
        })?;

        if let Some(fraction) = fraction {
            if !matches!(unit, DurationUnit::Seconds) {
                return Err(ParseError::invalid_duration(
                    offset + num_start,
                    format!("only seconds may have a fraction, found '{digits}{c}'"),
                ));
            }
            dur.nanoseconds = parse_fraction(fraction, offset + num_start + whole.len() + 1)?;
        }

        apply_duration_component(dur, unit, value);
        next_unit += found + 1;
        num_start = i + c.len_utf8();
        components += 1;
    }

    if num_start < section.len() {
        return Err(ParseError::invalid_duration(
            offset + num_start,
            "number without unit designator",
        ));
    }

    Ok(components)
}

/// Parses up to nine fractional digits as nanoseconds.
fn parse_fraction(fraction: &str, position: usize) -> ParseResult<u32> {
    if fraction.is_empty() || fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ParseError::invalid_duration(
            position,
            format!("invalid fraction '{fraction}'"),
        ));
    }

    format!("{fraction:0<9}")
        .parse::<u32>()
        .map_err(|err| ParseError::invalid_duration(position, format!("{fraction}: {err}")))
}

/// Applies a parsed component value to the duration.
fn apply_duration_component(dur: &mut IsoDuration, unit: DurationUnit, value: u32) {
    match unit {
        DurationUnit::Years => dur.years = value,
        DurationUnit::Months => dur.months = value,
        DurationUnit::Weeks => dur.weeks = value,
        DurationUnit::Days => dur.days = value,
        DurationUnit::Hours => dur.hours = value,
        DurationUnit::Minutes => dur.minutes = value,
        DurationUnit::Seconds => dur.seconds = value,
    }
}

/// Parses a date-time with offset (RFC 3339 profile of ISO 8601).
///
/// Format: `YYYY-MM-DDTHH:MM:SS[.f](Z|+HH:MM)` (e.g., "2024-01-01T08:00:00Z")
///
/// ## Errors
/// Returns an error if the string is not a valid RFC 3339 date-time.
pub fn parse_datetime(s: &str) -> ParseResult<DateTime<FixedOffset>> {
    if s.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::InvalidDateTime,
            0,
            "start date-time must not be empty",
        ));
    }

    DateTime::parse_from_rfc3339(s)
        .map_err(|err| ParseError::new(ParseErrorKind::InvalidDateTime, 0, err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_hours() {
        let dur = parse_duration("PT1H").unwrap();
        assert_eq!(dur.hours, 1);
        assert!(!dur.has_calendar_part());
    }

    #[test]
    fn parse_duration_all_components() {
        let dur = parse_duration("P1Y2M3W4DT5H6M7S").unwrap();
        assert_eq!(
            dur,
            IsoDuration {
                years: 1,
                months: 2,
                weeks: 3,
                days: 4,
                hours: 5,
                minutes: 6,
                seconds: 7,
                nanoseconds: 0,
            }
        );
    }

    #[test]
    fn parse_duration_month_versus_minute() {
        let dur = parse_duration("P1MT1M").unwrap();
        assert_eq!(dur.months, 1);
        assert_eq!(dur.minutes, 1);
    }

    #[test]
    fn parse_duration_explicit_zero() {
        let dur = parse_duration("PT0S").unwrap();
        assert!(dur.is_zero());
    }

    #[test]
    fn parse_duration_requires_marker() {
        let err = parse_duration("1H").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidDuration);
        assert_eq!(err.position, 0);
    }

    #[test]
    fn parse_duration_requires_component() {
        assert_eq!(
            parse_duration("P").unwrap_err().kind,
            ParseErrorKind::InvalidDuration
        );
        let err = parse_duration("P1DT").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidDuration);
        assert_eq!(err.position, 3);
    }

    #[test]
    fn parse_duration_rejects_out_of_order() {
        let err = parse_duration("PT1M1H").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter);
        assert_eq!(err.position, 5);
    }

    #[test]
    fn parse_duration_rejects_time_unit_in_date_part() {
        let err = parse_duration("P1H").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter);
        assert_eq!(err.position, 2);
    }

    #[test]
    fn parse_duration_rejects_dangling_number() {
        let err = parse_duration("PT15").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidDuration);
        assert_eq!(err.position, 2);
    }

    #[test]
    fn parse_duration_rejects_missing_value() {
        let err = parse_duration("PTH").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidDuration);
        assert_eq!(err.position, 2);
    }

    #[test]
    fn parse_duration_rejects_overflow() {
        let err = parse_duration("PT99999999999H").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidDuration);
    }

    #[test]
    fn parse_duration_fractional_seconds() {
        let dur = parse_duration("PT1.5S").unwrap();
        assert_eq!(dur.seconds, 1);
        assert_eq!(dur.nanoseconds, 500_000_000);

        let dur = parse_duration("PT2M0,000000001S").unwrap();
        assert_eq!(dur.minutes, 2);
        assert_eq!(dur.nanoseconds, 1);
    }

    #[test]
    fn parse_duration_rejects_fraction_outside_seconds() {
        let err = parse_duration("PT1.5M").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidDuration);
        assert_eq!(err.position, 2);

        assert!(parse_duration("P1.5D").is_err());
    }

    #[test]
    fn parse_duration_rejects_malformed_fraction() {
        let err = parse_duration("PT1.S").unwrap_err();
        assert_eq!(err.position, 4);
        assert!(parse_duration("PT.5S").is_err());
        assert!(parse_duration("PT1.2.3S").is_err());
        assert!(parse_duration("PT1.1234567891S").is_err());
    }

    #[test]
    fn parse_duration_empty() {
        assert_eq!(parse_duration("").unwrap_err().kind, ParseErrorKind::Empty);
    }

    #[test]
    fn parse_datetime_utc() {
        let dt = parse_datetime("2024-01-01T08:00:00Z").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
    }

    #[test]
    fn parse_datetime_offset() {
        let dt = parse_datetime("2024-01-01T08:00:00+05:30").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn parse_datetime_invalid() {
        let err = parse_datetime("2024-13-01T08:00:00Z").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidDateTime);
        assert!(parse_datetime("").is_err());
    }
}
