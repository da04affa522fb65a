use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, FileFormat};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

pub const DEFAULT_MAX_EXPANSION_COUNT: usize = 10_000;
pub const DEFAULT_EXPANSION_COUNT: usize = 52;
pub const DEFAULT_LOG_LEVEL: &str = "info";

const ENV_PREFIX: &str = "CADENCE";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub scheduling: SchedulingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingConfig {
    /// Upper bound on the `count` a caller may request from a single expansion.
    pub max_expansion_count: usize,
    /// Count used by callers that do not pick one themselves.
    pub default_expansion_count: usize,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            max_expansion_count: DEFAULT_MAX_EXPANSION_COUNT,
            default_expansion_count: DEFAULT_EXPANSION_COUNT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// ## Summary
    /// Returns a configuration builder pre-populated with every default value.
    ///
    /// ## Errors
    /// Returns an error if a default value cannot be registered.
    pub fn builder() -> CoreResult<ConfigBuilder<DefaultState>> {
        let max_count = i64::try_from(DEFAULT_MAX_EXPANSION_COUNT).map_err(|err| {
            CoreError::InvalidConfiguration(format!("default max expansion count: {err}"))
        })?;
        let default_count = i64::try_from(DEFAULT_EXPANSION_COUNT).map_err(|err| {
            CoreError::InvalidConfiguration(format!("default expansion count: {err}"))
        })?;

        Ok(Config::builder()
            .set_default("scheduling.max_expansion_count", max_count)?
            .set_default("scheduling.default_expansion_count", default_count)?
            .set_default("logging.level", DEFAULT_LOG_LEVEL)?)
    }

    /// ## Summary
    /// Loads configuration from defaults, an optional `config.toml` and
    /// `CADENCE__`-prefixed environment variables, in increasing precedence.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the configuration fails.
    pub fn load() -> CoreResult<Self> {
        let settings = Self::builder()?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Environment
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Loads configuration from an in-memory TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document is malformed or the result fails validation.
    pub fn from_toml_str(source: &str) -> CoreResult<Self> {
        let settings = Self::builder()?
            .add_source(config::File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks cross-field constraints that deserialization cannot express.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if the expansion limit is zero
    /// or the default count exceeds it.
    pub fn validate(&self) -> CoreResult<()> {
        let scheduling = &self.scheduling;
        if scheduling.max_expansion_count == 0 {
            return Err(CoreError::InvalidConfiguration(
                "scheduling.max_expansion_count must be at least 1".to_string(),
            ));
        }
        if scheduling.default_expansion_count > scheduling.max_expansion_count {
            return Err(CoreError::InvalidConfiguration(format!(
                "scheduling.default_expansion_count ({}) exceeds scheduling.max_expansion_count ({})",
                scheduling.default_expansion_count, scheduling.max_expansion_count
            )));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables, `.env` and `config.toml`.
///
/// ## Errors
/// Returns an error if loading, deserializing or validating the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load().context("failed to load Cadence configuration")?;
    tracing::debug!(config = ?settings, "Configuration loaded");
    Ok(settings)
}

#[cfg(test)]
mod tests;
