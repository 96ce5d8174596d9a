//! # Watchpost Poll
//!
//! Bounded, cancellable poll-until-condition for async status checks.
//!
//! A typical caller triggers a mutating action (retry a webhook, start an
//! export) and then polls a read endpoint until the resource leaves its
//! pending state. The trigger itself is never retried; only the status
//! check is.
//!
//! ## Semantics
//!
//! - Every attempt waits `poll_interval` first, then fetches, then
//!   evaluates the predicate. Attempts never overlap.
//! - The loop ends with exactly one [`PollOutcome`]: `Matched`,
//!   `Exhausted` or `Cancelled`.
//! - Cancellation is cooperative. It is checked before each wait, raced
//!   against the wait, and checked again after each fetch. A fetch that is
//!   already running is allowed to finish, but its value is discarded.
//! - A fetch error ends the loop and is returned unchanged. Exhaustion and
//!   cancellation are regular outcomes, not errors.
//! - There is no backoff and no separate timeout: the bound is
//!   `max_attempts × poll_interval`.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use watchpost_poll::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), std::io::Error> {
//! let token = CancellationToken::new();
//! let options = PollOptions::new(3, Duration::from_millis(5)).with_cancellation(token.child_token());
//!
//! let result = poll(
//!     || async { Ok::<_, std::io::Error>("succeeded") },
//!     |status| *status != "pending",
//!     options,
//! )
//! .await?;
//!
//! assert_eq!(result.outcome(), PollOutcome::Matched);
//! assert_eq!(result.value(), Some(&"succeeded"));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod hooks;
pub mod options;
pub mod wait;

mod poller;
mod result;

pub use error::{ConfigError, ConfigResult};
pub use hooks::{LogLevel, LoggingHook, PollEvent, PollHook, PollHooks};
pub use options::{MAX_POLL_BUDGET, MAX_POLL_INTERVAL, PollOptions};
pub use poller::{Poller, poll, poll_infallible};
pub use result::{PollOutcome, PollResult};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::{PollOptions, PollOutcome, PollResult, Poller, poll, poll_infallible};
}
