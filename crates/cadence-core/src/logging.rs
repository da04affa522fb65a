//! Tracing subscriber setup for binaries and tests that embed the engine.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::error::{CoreError, CoreResult};

/// ## Summary
/// Builds the `EnvFilter` described by the logging configuration.
///
/// ## Errors
/// Returns `CoreError::InvalidConfiguration` if the level is not a valid filter directive.
pub fn build_filter(config: &LoggingConfig) -> CoreResult<EnvFilter> {
    EnvFilter::try_new(config.level.as_str()).map_err(|err| {
        CoreError::InvalidConfiguration(format!("logging.level {:?}: {err}", config.level))
    })
}

/// ## Summary
/// Installs the global tracing subscriber with the configured filter and a
/// formatting layer that records target, thread, file and line.
///
/// ## Errors
/// Returns an error if the level is invalid or a global subscriber is already set.
///
/// ## Side Effects
/// Sets the process-wide default tracing subscriber.
pub fn init_tracing(config: &LoggingConfig) -> CoreResult<()> {
    let filter = build_filter(config)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .map_err(|err| CoreError::LoggingError(err.to_string()))?;

    tracing::info!(level = %config.level, "Tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_directives() {
        let config = LoggingConfig {
            level: "warn,cadence_schedule=trace".to_string(),
        };
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn test_build_filter_rejects_garbage() {
        let config = LoggingConfig {
            level: "cadence=notalevel".to_string(),
        };
        assert!(matches!(
            build_filter(&config),
            Err(CoreError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_init_tracing_twice_fails() {
        let config = LoggingConfig::default();
        // The first call may race with other tests; the second must always fail.
        let _first = init_tracing(&config);
        assert!(matches!(
            init_tracing(&config),
            Err(CoreError::LoggingError(_))
        ));
    }
}
