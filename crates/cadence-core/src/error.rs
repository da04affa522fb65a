use thiserror::Error;

/// Core-level errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    ConfigError(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Logging setup error: {0}")]
    LoggingError(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
