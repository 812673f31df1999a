use thiserror::Error;

use crate::iso8601::parse::{ParseError, RepeatingIntervalError};

/// ISO-8601 parsing and configuration errors
#[derive(Error, Debug)]
pub enum IsoError {
    #[error("Interval parse error: {0}")]
    Interval(#[from] ParseError),

    #[error("Repeating interval parse error: {0}")]
    RepeatingInterval(#[from] RepeatingIntervalError),

    #[error(transparent)]
    CoreError(#[from] cadence_core::error::CoreError),
}

pub type IsoResult<T> = std::result::Result<T, IsoError>;
