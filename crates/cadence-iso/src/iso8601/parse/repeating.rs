//! Repeating interval parser (`R[n]<designator><interval>`).

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use cadence_core::config::ParseConfig;
use cadence_core::constants::{DEFAULT_DESIGNATOR, INFINITE, REPETITION_MARKER};
use thiserror::Error;

use super::interval::{IntervalParser, IsoIntervalParser};
use crate::error::IsoResult;
use crate::iso8601::core::RepeatingInterval;

/// Errors raised while parsing a repeating interval.
#[derive(Error, Debug)]
pub enum RepeatingIntervalError {
    #[error("repetition spec must not be empty")]
    EmptyInput,

    #[error("interval designator must not be empty")]
    EmptyDesignator,

    #[error("repetition spec must start with R: {text:?} (position {position})")]
    MissingMarker { text: String, position: usize },

    #[error("no interval given: {text:?}")]
    MissingInterval {
        text: String,
        /// Offset of the designator, `None` if it was not found.
        position: Option<usize>,
    },

    #[error("cannot parse repetitions count {text:?} (position {position})")]
    InvalidRepetitionCount {
        text: String,
        position: usize,
        #[source]
        source: ParseIntError,
    },

    #[error("repetitions count must not be negative: {value} (position {position})")]
    NegativeRepetitionCount {
        text: String,
        position: usize,
        value: i32,
    },

    #[error("cannot parse interval {text:?}: {source}")]
    IntervalBody {
        text: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RepeatingIntervalError {
    #[must_use]
    pub const fn kind(&self) -> RepeatingIntervalErrorKind {
        match self {
            Self::EmptyInput => RepeatingIntervalErrorKind::EmptyInput,
            Self::EmptyDesignator => RepeatingIntervalErrorKind::EmptyDesignator,
            Self::MissingMarker { .. } => RepeatingIntervalErrorKind::MissingMarker,
            Self::MissingInterval { .. } => RepeatingIntervalErrorKind::MissingInterval,
            Self::InvalidRepetitionCount { .. } => {
                RepeatingIntervalErrorKind::InvalidRepetitionCount
            }
            Self::NegativeRepetitionCount { .. } => {
                RepeatingIntervalErrorKind::NegativeRepetitionCount
            }
            Self::IntervalBody { .. } => RepeatingIntervalErrorKind::IntervalBody,
        }
    }

    /// Returns the offending text, if the error refers to one.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::EmptyInput | Self::EmptyDesignator => None,
            Self::MissingMarker { text, .. }
            | Self::MissingInterval { text, .. }
            | Self::InvalidRepetitionCount { text, .. }
            | Self::NegativeRepetitionCount { text, .. }
            | Self::IntervalBody { text, .. } => Some(text.as_str()),
        }
    }

    /// Returns the byte offset into the original text where the problem was
    /// found, if known.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::MissingMarker { position, .. }
            | Self::InvalidRepetitionCount { position, .. }
            | Self::NegativeRepetitionCount { position, .. } => Some(*position),
            Self::MissingInterval { position, .. } => *position,
            Self::EmptyInput | Self::EmptyDesignator | Self::IntervalBody { .. } => None,
        }
    }
}

/// Discriminant of [`RepeatingIntervalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepeatingIntervalErrorKind {
    EmptyInput,
    EmptyDesignator,
    MissingMarker,
    MissingInterval,
    InvalidRepetitionCount,
    NegativeRepetitionCount,
    IntervalBody,
}

impl fmt::Display for RepeatingIntervalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "empty input"),
            Self::EmptyDesignator => write!(f, "empty designator"),
            Self::MissingMarker => write!(f, "missing repetition marker"),
            Self::MissingInterval => write!(f, "missing interval"),
            Self::InvalidRepetitionCount => write!(f, "invalid repetition count"),
            Self::NegativeRepetitionCount => write!(f, "negative repetition count"),
            Self::IntervalBody => write!(f, "invalid interval"),
        }
    }
}

/// Parser for `R[n]<designator><interval>` expressions.
///
/// The text before the first occurrence of the designator is the repetition
/// marker: `R` alone means the interval repeats forever, `R<n>` means it
/// repeats `n` times. Everything after the designator is handed to the
/// interval parser `P`.
#[derive(Debug, Clone)]
pub struct RepeatingIntervalParser<P = IsoIntervalParser> {
    interval_parser: P,
    designator: String,
    allow_negative_repetitions: bool,
}

impl Default for RepeatingIntervalParser {
    fn default() -> Self {
        Self::new(IsoIntervalParser)
    }
}

impl<P: IntervalParser> RepeatingIntervalParser<P> {
    /// Creates a parser using the default `/` designator.
    #[must_use]
    pub fn new(interval_parser: P) -> Self {
        Self {
            interval_parser,
            designator: DEFAULT_DESIGNATOR.to_string(),
            allow_negative_repetitions: false,
        }
    }

    /// Creates a parser from validated configuration.
    ///
    /// ## Errors
    /// Returns an error if the configuration is invalid.
    pub fn from_config(interval_parser: P, config: &ParseConfig) -> IsoResult<Self> {
        config.validate()?;

        Ok(Self::new(interval_parser)
            .with_designator(config.designator.clone())
            .with_negative_repetitions(config.allow_negative_repetitions))
    }

    #[must_use]
    pub fn with_designator(mut self, designator: impl Into<String>) -> Self {
        self.designator = designator.into();
        self
    }

    /// Accepts negative repetition counts such as `R-3/PT1H` instead of
    /// rejecting them.
    #[must_use]
    pub fn with_negative_repetitions(mut self, allow: bool) -> Self {
        self.allow_negative_repetitions = allow;
        self
    }

    #[must_use]
    pub fn designator(&self) -> &str {
        &self.designator
    }

    /// Parses `text` using this parser's designator.
    ///
    /// ## Errors
    /// See [`RepeatingIntervalParser::parse_with_designator`].
    pub fn parse(
        &self,
        text: &str,
    ) -> Result<RepeatingInterval<P::Interval>, RepeatingIntervalError> {
        self.parse_with_designator(text, &self.designator)
    }

    /// Parses `text`, splitting it at the first occurrence of `designator`.
    ///
    /// ## Errors
    /// Returns an error if `text` or `designator` is empty, if `text` does
    /// not start with `R`, if nothing follows the designator, if the
    /// repetition count is not an integer (or is negative, unless allowed),
    /// or if the interval parser rejects the interval body.
    #[tracing::instrument(skip(self, text), fields(input_len = text.len()))]
    pub fn parse_with_designator(
        &self,
        text: &str,
        designator: &str,
    ) -> Result<RepeatingInterval<P::Interval>, RepeatingIntervalError> {
        if text.is_empty() {
            tracing::warn!("Empty repeating interval input");
            return Err(RepeatingIntervalError::EmptyInput);
        }

        if designator.is_empty() {
            tracing::warn!("Empty interval designator");
            return Err(RepeatingIntervalError::EmptyDesignator);
        }

        let designator_offset = text.find(designator);

        if !text.starts_with(REPETITION_MARKER) {
            tracing::warn!(text, "Repetition spec does not start with R");
            return Err(RepeatingIntervalError::MissingMarker {
                text: text.to_string(),
                position: 0,
            });
        }

        let Some(offset) =
            designator_offset.filter(|offset| offset + designator.len() < text.len())
        else {
            tracing::warn!(text, offset = ?designator_offset, "No interval given");
            return Err(RepeatingIntervalError::MissingInterval {
                text: text.to_string(),
                position: designator_offset,
            });
        };

        let interval_text = &text[offset + designator.len()..];
        let interval = self
            .interval_parser
            .parse_interval(interval_text)
            .map_err(|err| {
                tracing::warn!(error = %err, interval = interval_text, "Interval body rejected");
                RepeatingIntervalError::IntervalBody {
                    text: interval_text.to_string(),
                    source: Box::new(err),
                }
            })?;

        let repetitions = if offset > 1 {
            self.parse_repetitions(&text[1..offset])?
        } else {
            INFINITE
        };

        tracing::debug!(repetitions, "Parsed repeating interval");

        Ok(RepeatingInterval::new(repetitions, interval))
    }

    /// Parses the count between the `R` marker and the designator.
    fn parse_repetitions(&self, repetitions_text: &str) -> Result<i32, RepeatingIntervalError> {
        let repetitions = repetitions_text.parse::<i32>().map_err(|err| {
            tracing::warn!(error = %err, text = repetitions_text, "Invalid repetitions count");
            RepeatingIntervalError::InvalidRepetitionCount {
                text: repetitions_text.to_string(),
                position: 1,
                source: err,
            }
        })?;

        if repetitions < 0 && !self.allow_negative_repetitions {
            tracing::warn!(repetitions, "Negative repetitions count");
            return Err(RepeatingIntervalError::NegativeRepetitionCount {
                text: repetitions_text.to_string(),
                position: 1,
                value: repetitions,
            });
        }

        Ok(repetitions)
    }
}

/// Parses a repeating interval using the `/` designator and the default
/// interval grammar.
///
/// ## Errors
/// Returns an error if `text` is not a well-formed repeating interval.
pub fn parse(text: &str) -> Result<RepeatingInterval, RepeatingIntervalError> {
    RepeatingIntervalParser::default().parse(text)
}

/// Parses a repeating interval using a custom designator and the default
/// interval grammar.
///
/// ## Errors
/// Returns an error if `text` is not a well-formed repeating interval.
pub fn parse_with_designator(
    text: &str,
    designator: &str,
) -> Result<RepeatingInterval, RepeatingIntervalError> {
    RepeatingIntervalParser::default().parse_with_designator(text, designator)
}

impl FromStr for RepeatingInterval {
    type Err = RepeatingIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
