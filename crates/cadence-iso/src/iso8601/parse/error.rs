//! Interval grammar parse error types.

use std::fmt;

/// Result type for interval parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred while parsing an interval body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Byte offset into the parsed text where the error was detected.
    pub position: usize,
    /// Additional context or message.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, position: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            message: message.into(),
        }
    }

    /// Creates an empty input error.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(ParseErrorKind::Empty, 0, "interval must not be empty")
    }

    /// Creates an invalid duration error.
    #[must_use]
    pub fn invalid_duration(position: usize, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::InvalidDuration, position, message)
    }

    /// Creates an unexpected character error.
    #[must_use]
    pub fn unexpected(position: usize, found: char) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedCharacter,
            position,
            format!("unexpected character '{found}'"),
        )
    }

    /// Shifts the position by `offset`, for errors raised on a substring.
    #[must_use]
    pub fn offset_by(mut self, offset: usize) -> Self {
        self.position += offset;
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "position {}: {}: {}",
            self.position, self.kind, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Nothing to parse.
    Empty,
    /// Malformed duration.
    InvalidDuration,
    /// Malformed start date-time.
    InvalidDateTime,
    /// Character not allowed at this position.
    UnexpectedCharacter,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty input"),
            Self::InvalidDuration => write!(f, "invalid duration"),
            Self::InvalidDateTime => write!(f, "invalid date/time"),
            Self::UnexpectedCharacter => write!(f, "unexpected character"),
        }
    }
}
