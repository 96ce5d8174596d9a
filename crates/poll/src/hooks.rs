//! Lifecycle hooks for poll loops
//!
//! Hooks receive a [`PollEvent`] at every step of a loop. They run inline
//! on the polling task, so implementations must be cheap and must not
//! block.
//!
//! ```rust
//! use std::sync::Arc;
//! use watchpost_poll::hooks::{LogLevel, LoggingHook, PollHooks};
//!
//! let hooks = PollHooks::new().with_hook(Arc::new(LoggingHook::new(LogLevel::Debug)));
//! assert_eq!(hooks.len(), 1);
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::result::PollOutcome;

/// Log level for [`LoggingHook`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

/// Events emitted while a poll loop runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    /// The loop started
    Started {
        /// Poller name
        name: &'static str,
        /// Configured attempt bound
        max_attempts: u32,
    },
    /// The wait before `attempt` finished and the fetch is about to run
    AttemptStarted {
        /// Poller name
        name: &'static str,
        /// 1-based attempt number
        attempt: u32,
    },
    /// The fetch for `attempt` returned an error; the loop ends with it
    FetchFailed {
        /// Poller name
        name: &'static str,
        /// 1-based attempt number
        attempt: u32,
    },
    /// The predicate rejected the value from `attempt`
    ValueRejected {
        /// Poller name
        name: &'static str,
        /// 1-based attempt number
        attempt: u32,
    },
    /// The loop terminated
    Finished {
        /// Poller name
        name: &'static str,
        /// Termination reason
        outcome: PollOutcome,
        /// Fetches started
        attempts: u32,
        /// Time spent in the loop
        elapsed: Duration,
    },
}

impl fmt::Display for PollEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { name, max_attempts } => {
                write!(f, "{name}: polling up to {max_attempts} attempts")
            }
            Self::AttemptStarted { name, attempt } => {
                write!(f, "{name}: attempt {attempt} started")
            }
            Self::FetchFailed { name, attempt } => {
                write!(f, "{name}: attempt {attempt} failed to fetch")
            }
            Self::ValueRejected { name, attempt } => {
                write!(f, "{name}: attempt {attempt} did not meet the condition")
            }
            Self::Finished {
                name,
                outcome,
                attempts,
                elapsed,
            } => {
                write!(f, "{name}: {outcome} after {attempts} attempts in {elapsed:?}")
            }
        }
    }
}

/// Observer for poll lifecycle events
pub trait PollHook: Send + Sync {
    /// Called for every event, in order
    fn on_event(&self, event: &PollEvent);
}

/// Collection of hooks, cheap to clone
#[derive(Default, Clone)]
pub struct PollHooks {
    hooks: Arc<Vec<Arc<dyn PollHook>>>,
}

impl PollHooks {
    /// Create an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hook to the collection
    #[must_use]
    pub fn with_hook(mut self, hook: Arc<dyn PollHook>) -> Self {
        Arc::make_mut(&mut self.hooks).push(hook);
        self
    }

    /// Emit an event to all hooks
    pub fn emit(&self, event: &PollEvent) {
        for hook in self.hooks.iter() {
            hook.on_event(event);
        }
    }

    /// Number of registered hooks
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// `true` when no hook is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for PollHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollHooks")
            .field("len", &self.hooks.len())
            .finish()
    }
}

/// Hook that writes every event to `tracing` at a fixed level
#[derive(Debug, Clone, Copy)]
pub struct LoggingHook {
    level: LogLevel,
}

impl LoggingHook {
    /// Create a new logging hook
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }
}

impl PollHook for LoggingHook {
    fn on_event(&self, event: &PollEvent) {
        match self.level {
            LogLevel::Error => tracing::error!("{event}"),
            LogLevel::Warn => tracing::warn!("{event}"),
            LogLevel::Info => tracing::info!("{event}"),
            LogLevel::Debug => tracing::debug!("{event}"),
            LogLevel::Trace => tracing::trace!("{event}"),
        }
    }
}
