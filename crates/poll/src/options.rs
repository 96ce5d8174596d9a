//! Poll configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::{ConfigError, ConfigResult};

/// Longest interval accepted by [`PollOptions::validate`].
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(3600);

/// Longest total budget accepted by [`PollOptions::validate`].
pub const MAX_POLL_BUDGET: Duration = Duration::from_secs(24 * 3600);

/// Configuration for a single poll invocation.
///
/// `max_attempts` bounds the number of fetches and `poll_interval` is
/// waited before every fetch, including the first one. The optional
/// cancellation token stops the loop at its next suspension point.
///
/// The token is not part of the serialized form: options loaded from a
/// config file start without one and get it attached with
/// [`with_cancellation`](Self::with_cancellation).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollOptions {
    /// Upper bound on fetch invocations. `0` performs no fetch at all.
    pub max_attempts: u32,

    /// Delay before each fetch attempt.
    #[cfg_attr(feature = "humantime", serde(with = "humantime_serde"))]
    pub poll_interval: Duration,

    /// Cooperative cancellation handle.
    #[serde(skip)]
    pub cancellation: Option<CancellationToken>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            poll_interval: Duration::from_secs(1),
            cancellation: None,
        }
    }
}

impl PollOptions {
    /// Create options without a cancellation token.
    #[must_use]
    pub const fn new(max_attempts: u32, poll_interval: Duration) -> Self {
        Self {
            max_attempts,
            poll_interval,
            cancellation: None,
        }
    }

    /// Set the maximum number of attempts
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the interval waited before each attempt
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Attach a cancellation token.
    ///
    /// Pass a [`CancellationToken::child_token`] when the caller wants to
    /// stop this poll without cancelling siblings.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Whether the attached token, if any, has already fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Total waiting time implied by the options (`max_attempts × poll_interval`).
    ///
    /// This is the only time bound a poll has. Returns `None` when the
    /// product does not fit in a [`Duration`].
    #[must_use]
    pub fn budget(&self) -> Option<Duration> {
        self.poll_interval.checked_mul(self.max_attempts)
    }

    /// Validate options loaded from configuration.
    ///
    /// [`poll`](crate::poll) never calls this; any combination of values
    /// runs there, including `max_attempts == 0`.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.poll_interval > MAX_POLL_INTERVAL {
            return Err(ConfigError::IntervalTooLong {
                interval: self.poll_interval,
                max: MAX_POLL_INTERVAL,
            });
        }

        if self.budget().is_none_or(|budget| budget > MAX_POLL_BUDGET) {
            return Err(ConfigError::BudgetTooLong {
                max_attempts: self.max_attempts,
                poll_interval: self.poll_interval,
                max: MAX_POLL_BUDGET,
            });
        }

        Ok(())
    }
}
