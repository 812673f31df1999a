//! ISO-8601 durations, intervals and repeating intervals.

pub mod core;
pub mod parse;
