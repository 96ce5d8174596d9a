//! Poll outcome and result types

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Why a poll loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollOutcome {
    /// The predicate accepted a fetched value
    Matched,
    /// Every permitted attempt ran without a match
    Exhausted,
    /// The cancellation token fired first
    Cancelled,
}

impl PollOutcome {
    /// Stable lowercase name, used in logs and reports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::Exhausted => "exhausted",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one poll invocation.
///
/// Built once when the loop terminates and never mutated afterwards.
/// [`value`](Self::value) is only populated for [`PollOutcome::Matched`];
/// the last value the predicate rejected is still reachable through
/// [`last_seen`](Self::last_seen).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResult<T> {
    outcome: PollOutcome,
    value: Option<T>,
    rejected: Option<T>,
    attempts: u32,
    elapsed: Duration,
}

impl<T> PollResult<T> {
    pub(crate) fn matched(value: T, attempts: u32, elapsed: Duration) -> Self {
        Self {
            outcome: PollOutcome::Matched,
            value: Some(value),
            rejected: None,
            attempts,
            elapsed,
        }
    }

    pub(crate) fn exhausted(rejected: Option<T>, attempts: u32, elapsed: Duration) -> Self {
        Self {
            outcome: PollOutcome::Exhausted,
            value: None,
            rejected,
            attempts,
            elapsed,
        }
    }

    pub(crate) fn cancelled(rejected: Option<T>, attempts: u32, elapsed: Duration) -> Self {
        Self {
            outcome: PollOutcome::Cancelled,
            value: None,
            rejected,
            attempts,
            elapsed,
        }
    }

    /// Why the loop stopped
    #[must_use]
    pub const fn outcome(&self) -> PollOutcome {
        self.outcome
    }

    /// The value the predicate accepted, if any
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Consume the result, keeping only the accepted value
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// `true` iff the predicate accepted a value
    #[must_use]
    pub const fn condition_met(&self) -> bool {
        matches!(self.outcome, PollOutcome::Matched)
    }

    /// `true` iff the loop ended because of cancellation
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self.outcome, PollOutcome::Cancelled)
    }

    /// `true` iff every attempt ran without a match
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.outcome, PollOutcome::Exhausted)
    }

    /// Last value handed to the predicate.
    ///
    /// Equal to [`value`](Self::value) on a match. On exhaustion or
    /// cancellation it is the last rejected value. A fetch that completed
    /// after cancellation fired is never evaluated and so never shows
    /// up here.
    #[must_use]
    pub fn last_seen(&self) -> Option<&T> {
        self.value.as_ref().or(self.rejected.as_ref())
    }

    /// Consume the result, keeping the last value handed to the predicate
    #[must_use]
    pub fn into_last_seen(self) -> Option<T> {
        self.value.or(self.rejected)
    }

    /// Number of fetches started
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Time from invocation until the result was built
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
