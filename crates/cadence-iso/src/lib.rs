//! ISO-8601 repeating interval parsing.
//!
//! ```rust
//! use cadence_iso::iso8601::parse;
//!
//! let every_hour = parse::parse("R/PT1H").unwrap();
//! assert!(every_hour.is_infinite());
//!
//! let five_times = parse::parse("R5/PT1H").unwrap();
//! assert_eq!(five_times.count(), Some(5));
//! assert_eq!(five_times.interval(), every_hour.interval());
//! ```

pub mod error;
pub mod iso8601;
