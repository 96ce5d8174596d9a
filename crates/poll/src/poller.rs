//! The poll-until-condition loop

use std::convert::Infallible;
use std::future::Future;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::hooks::{PollEvent, PollHooks};
use crate::options::PollOptions;
use crate::result::{PollOutcome, PollResult};
use crate::wait::{WaitOutcome, wait};

const DEFAULT_NAME: &str = "poll";

/// Bounded, cancellable retry loop around an async fetch.
///
/// Each attempt waits `poll_interval`, runs the fetch and hands the value
/// to the predicate. The loop ends on the first accepted value, after
/// `max_attempts` rejected ones, or when the cancellation token fires.
///
/// ```rust
/// use std::time::Duration;
/// use watchpost_poll::{PollOptions, Poller};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut calls = 0;
/// let result = Poller::new(PollOptions::new(5, Duration::from_millis(1)))
///     .with_name("export-job")
///     .run(
///         || {
///             calls += 1;
///             let status = if calls < 3 { "pending" } else { "ready" };
///             async move { Ok::<_, std::io::Error>(status) }
///         },
///         |status| *status == "ready",
///     )
///     .await
///     .unwrap();
///
/// assert!(result.condition_met());
/// assert_eq!(result.attempts(), 3);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Poller {
    options: PollOptions,
    hooks: PollHooks,
    name: &'static str,
}

impl Poller {
    /// Create a poller without hooks
    #[must_use]
    pub fn new(options: PollOptions) -> Self {
        Self {
            options,
            hooks: PollHooks::new(),
            name: DEFAULT_NAME,
        }
    }

    /// Name reported in spans and hook events
    #[must_use]
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Attach lifecycle hooks
    #[must_use]
    pub fn with_hooks(mut self, hooks: PollHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Options this poller runs with
    #[must_use]
    pub const fn options(&self) -> &PollOptions {
        &self.options
    }

    /// Run the loop.
    ///
    /// `fetch` is invoked at most `max_attempts` times, never concurrently.
    /// `is_done` sees each freshly fetched value exactly once.
    ///
    /// # Errors
    ///
    /// The first `Err` from `fetch` ends the loop and is returned as is.
    /// Errors are not retried; a caller that wants to keep polling through
    /// transient failures should map them to a value inside `fetch`.
    #[tracing::instrument(
        name = "poll",
        skip_all,
        fields(
            poller = self.name,
            max_attempts = self.options.max_attempts,
            poll_interval_ms = self.options.poll_interval.as_millis() as u64,
        )
    )]
    pub async fn run<T, E, F, Fut, P>(&self, mut fetch: F, mut is_done: P) -> Result<PollResult<T>, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: FnMut(&T) -> bool,
    {
        let start = Instant::now();
        let token = self.options.cancellation.as_ref();
        let interval = self.options.poll_interval;
        let max_attempts = self.options.max_attempts;

        self.hooks.emit(&PollEvent::Started {
            name: self.name,
            max_attempts,
        });

        let mut rejected = None;

        for attempt in 1..=max_attempts {
            let completed = attempt - 1;

            if token.is_some_and(CancellationToken::is_cancelled) {
                debug!(completed, "cancelled before wait");
                return Ok(self.finish(PollResult::cancelled(rejected, completed, start.elapsed())));
            }

            if wait(interval, token).await == WaitOutcome::Cancelled {
                debug!(completed, "cancelled during wait");
                return Ok(self.finish(PollResult::cancelled(rejected, completed, start.elapsed())));
            }

            self.hooks.emit(&PollEvent::AttemptStarted {
                name: self.name,
                attempt,
            });
            debug!(attempt, "fetching");

            let value = match fetch().await {
                Ok(value) => value,
                Err(error) => {
                    debug!(attempt, "fetch failed, ending poll");
                    self.hooks.emit(&PollEvent::FetchFailed {
                        name: self.name,
                        attempt,
                    });
                    return Err(error);
                }
            };

            // An in-flight fetch is never interrupted, but its value is
            // dropped once cancellation has been requested.
            if token.is_some_and(CancellationToken::is_cancelled) {
                debug!(attempt, "cancelled during fetch, discarding value");
                return Ok(self.finish(PollResult::cancelled(rejected, attempt, start.elapsed())));
            }

            if is_done(&value) {
                return Ok(self.finish(PollResult::matched(value, attempt, start.elapsed())));
            }

            self.hooks.emit(&PollEvent::ValueRejected {
                name: self.name,
                attempt,
            });
            rejected = Some(value);
        }

        Ok(self.finish(PollResult::exhausted(rejected, max_attempts, start.elapsed())))
    }

    fn finish<T>(&self, result: PollResult<T>) -> PollResult<T> {
        let outcome = result.outcome();
        let attempts = result.attempts();
        let elapsed = result.elapsed();

        match outcome {
            PollOutcome::Matched | PollOutcome::Cancelled => {
                debug!(%outcome, attempts, elapsed_ms = elapsed.as_millis() as u64, "poll finished");
            }
            PollOutcome::Exhausted => {
                info!(attempts, elapsed_ms = elapsed.as_millis() as u64, "poll exhausted without a match");
            }
        }

        self.hooks.emit(&PollEvent::Finished {
            name: self.name,
            outcome,
            attempts,
            elapsed,
        });
        result
    }
}

/// Poll `fetch` until `is_done` accepts a value.
///
/// Shortcut for `Poller::new(options).run(fetch, is_done)`.
///
/// # Errors
///
/// Returns the first error produced by `fetch`, see [`Poller::run`].
pub async fn poll<T, E, F, Fut, P>(fetch: F, is_done: P, options: PollOptions) -> Result<PollResult<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: FnMut(&T) -> bool,
{
    Poller::new(options).run(fetch, is_done).await
}

/// [`poll`] for fetches that cannot fail.
pub async fn poll_infallible<T, F, Fut, P>(mut fetch: F, is_done: P, options: PollOptions) -> PollResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = T>,
    P: FnMut(&T) -> bool,
{
    let result = Poller::new(options)
        .run(
            || {
                let fut = fetch();
                async move { Ok::<T, Infallible>(fut.await) }
            },
            is_done,
        )
        .await;

    match result {
        Ok(result) => result,
        Err(never) => match never {},
    }
}
