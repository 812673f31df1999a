//! Interval body parsing.

use std::str::FromStr;

use super::error::{ParseError, ParseResult};
use super::values::{parse_datetime, parse_duration};
use crate::iso8601::core::{Interval, IsoDuration};

/// Separates an interval's start instant from its duration.
const START_SEPARATOR: char = '/';

/// Parses the text that follows the designator of a repeating interval.
///
/// The repeating interval parser treats the produced value as opaque, so any
/// grammar can be plugged in. Closures of the form
/// `Fn(&str) -> Result<I, E>` implement this trait as well.
pub trait IntervalParser {
    /// Parsed interval value.
    type Interval;
    /// Error returned for malformed interval text.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Parses `text` into an interval.
    ///
    /// ## Errors
    /// Returns an error if `text` is not a valid interval for this grammar.
    fn parse_interval(&self, text: &str) -> Result<Self::Interval, Self::Error>;
}

impl<F, I, E> IntervalParser for F
where
    F: Fn(&str) -> Result<I, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Interval = I;
    type Error = E;

    fn parse_interval(&self, text: &str) -> Result<I, E> {
        self(text)
    }
}

/// Default interval grammar: `duration` or `start/duration`.
///
/// `start` is an RFC 3339 date-time and `duration` an ISO 8601 duration,
/// e.g. `PT1H` or `2024-01-01T08:00:00Z/P1D`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoIntervalParser;

impl IntervalParser for IsoIntervalParser {
    type Interval = Interval;
    type Error = ParseError;

    fn parse_interval(&self, text: &str) -> ParseResult<Interval> {
        if text.is_empty() {
            return Err(ParseError::empty());
        }

        let Some((start_text, duration_text)) = text.split_once(START_SEPARATOR) else {
            return parse_duration(text).map(Interval::from_duration);
        };

        let start = parse_datetime(start_text)?;
        let duration =
            parse_duration(duration_text).map_err(|err| err.offset_by(start_text.len() + 1))?;

        Ok(Interval::new(Some(start), duration))
    }
}

impl FromStr for Interval {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IsoIntervalParser.parse_interval(s)
    }
}

impl FromStr for IsoDuration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s)
    }
}
