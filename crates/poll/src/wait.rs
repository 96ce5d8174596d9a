//! Cancellable delay between attempts

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// How a [`wait`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full interval elapsed
    Elapsed,
    /// The token fired before the interval elapsed
    Cancelled,
}

/// Wait for `interval`, giving up early if `token` fires.
///
/// A zero interval still yields to the scheduler once. Cancellation wins
/// when both branches are ready in the same poll.
pub async fn wait(interval: Duration, token: Option<&CancellationToken>) -> WaitOutcome {
    let Some(token) = token else {
        delay(interval).await;
        return WaitOutcome::Elapsed;
    };

    tokio::select! {
        biased;
        () = token.cancelled() => WaitOutcome::Cancelled,
        () = delay(interval) => WaitOutcome::Elapsed,
    }
}

async fn delay(interval: Duration) {
    if interval.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn assert_elapsed(start: Instant, expected: Duration) {
        let elapsed = start.elapsed();
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(2),
            "expected ~{expected:?}, got {elapsed:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_elapses_without_token() {
        let start = Instant::now();
        let outcome = wait(Duration::from_millis(1000), None).await;

        assert_eq!(outcome, WaitOutcome::Elapsed);
        assert_elapsed(start, Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_returns_early_on_cancel() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            canceller.cancel();
        });

        let start = Instant::now();
        let outcome = wait(Duration::from_millis(1000), Some(&token)).await;

        assert_eq!(outcome, WaitOutcome::Cancelled);
        assert_elapsed(start, Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_token_beats_zero_interval() {
        let token = CancellationToken::new();
        token.cancel();

        assert_eq!(wait(Duration::ZERO, Some(&token)).await, WaitOutcome::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_does_not_advance_clock() {
        let start = Instant::now();
        assert_eq!(wait(Duration::ZERO, None).await, WaitOutcome::Elapsed);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
