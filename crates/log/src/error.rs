//! Logging setup errors

use thiserror::Error;

/// Result type for logger setup
pub type LogResult<T> = Result<T, LogError>;

/// Errors raised while configuring or installing the subscriber
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// The level directive could not be parsed by `EnvFilter`
    #[error("invalid log filter {0}")]
    Filter(String),

    /// A configuration value was not recognised
    #[error("invalid log configuration: {0}")]
    Config(String),

    /// A global subscriber was already installed
    #[error("failed to install subscriber: {0}")]
    Init(String),
}
