use anyhow::Result;
use config::{Config, Environment, Source};
use serde::Deserialize;

use crate::constants::{CONFIG_FILE, DEFAULT_DESIGNATOR};
use crate::error::{CoreError, CoreResult};


#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub parse: ParseConfig,
    pub logging: LoggingConfig,
}

/// Options applied to every repeating interval parsed through the
/// configured parser.
#[derive(Debug, Clone, Deserialize)]
pub struct ParseConfig {
    pub designator: String,
    pub allow_negative_repetitions: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            designator: DEFAULT_DESIGNATOR.to_string(),
            allow_negative_repetitions: false,
        }
    }
}

impl ParseConfig {
    /// ## Summary
    /// Checks that the options describe a usable parser.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if the designator is empty.
    pub fn validate(&self) -> CoreResult<()> {
        if self.designator.is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "parse.designator must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, `CADENCE_*` environment variables
    /// and an optional `cadence.toml`, in increasing order of precedence.
    ///
    /// Nested keys use a double underscore in the environment, e.g.
    /// `CADENCE_PARSE__ALLOW_NEGATIVE_REPETITIONS=true`.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the
    /// configuration fails.
    pub fn load() -> Result<Self> {
        Self::load_from(
            environment(),
            config::File::with_name(CONFIG_FILE).required(false),
        )
    }

    /// Builds settings from defaults, then `env`, then `file`.
    fn load_from<E, F>(env: E, file: F) -> Result<Self>
    where
        E: Source + Send + Sync + 'static,
        F: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("parse.designator", DEFAULT_DESIGNATOR)?
            .set_default("parse.allow_negative_repetitions", false)?
            .set_default("logging.level", "info")?
            .add_source(env)
            .add_source(file)
            .build()?
            .try_deserialize::<Settings>()?;

        settings.parse.validate()?;
        tracing::debug!(designator = %settings.parse.designator, "Parse configuration validated");

        Ok(settings)
    }
}

/// `CADENCE_*` environment source, with `__` separating nested keys.
fn environment() -> Environment {
    Environment::with_prefix("CADENCE")
        .prefix_separator("_")
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
