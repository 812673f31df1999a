/// Separator placed between the repetition marker and the interval body.
pub const DEFAULT_DESIGNATOR: &str = "/";

/// Repetition count used when an expression carries no explicit count.
pub const INFINITE: i32 = -1;

/// Leading character of every repeating interval expression.
pub const REPETITION_MARKER: char = 'R';

/// Optional configuration file, looked up relative to the working directory.
pub const CONFIG_FILE: &str = "cadence.toml";
