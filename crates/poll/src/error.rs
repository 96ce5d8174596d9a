//! Configuration errors
//!
//! Fetch failures are not represented here: they are the caller's own
//! error type and come back from [`poll`](crate::poll) unchanged.

use std::time::Duration;

use thiserror::Error;

/// Result type for option validation
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Invalid poll configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Interval exceeds the accepted maximum
    #[error("poll interval {interval:?} exceeds the maximum of {max:?}")]
    IntervalTooLong {
        /// Configured interval
        interval: Duration,
        /// Accepted maximum
        max: Duration,
    },

    /// `max_attempts × poll_interval` exceeds the accepted maximum
    #[error("poll budget of {max_attempts} attempts at {poll_interval:?} exceeds {max:?}")]
    BudgetTooLong {
        /// Configured attempt count
        max_attempts: u32,
        /// Configured interval
        poll_interval: Duration,
        /// Accepted maximum
        max: Duration,
    },
}
