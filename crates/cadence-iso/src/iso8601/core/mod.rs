//! Value types produced by the ISO-8601 parsers.
//!
//! All types are immutable once built and compare structurally.

mod duration;
mod interval;
mod repeating;

pub use duration::IsoDuration;
pub use interval::Interval;
pub use repeating::RepeatingInterval;
