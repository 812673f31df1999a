//! ISO-8601 repeating interval parsing.
//!
//! The repeating interval grammar (`R[n]<designator><interval>`) lives in
//! [`RepeatingIntervalParser`]. The interval body is handed to an
//! [`IntervalParser`]; [`IsoIntervalParser`] is the default and accepts
//! `duration` or `start/duration`.
//!
//! ## Usage
//!
//! ```rust
//! use cadence_iso::iso8601::parse::{self, RepeatingIntervalParser};
//!
//! let slash = parse::parse("R5/PT1H").unwrap();
//! let colons = RepeatingIntervalParser::default()
//!     .with_designator("::")
//!     .parse("R5::PT1H")
//!     .unwrap();
//! assert_eq!(slash, colons);
//! ```

mod error;
mod interval;
mod repeating;
mod values;


pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use interval::{IntervalParser, IsoIntervalParser};
pub use repeating::{
    RepeatingIntervalError, RepeatingIntervalErrorKind, RepeatingIntervalParser, parse,
    parse_with_designator,
};
pub use values::{parse_datetime, parse_duration};
