//! Retry controller with exponential backoff and jitter.

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::{info, warn};

use quizforge_error::RetryableError;

/// Backoff schedule for rate-limited operations.
///
/// The delay after a failed attempt `k` (0-indexed) is
/// `min(base_delay * 2^k + uniform(0, 1), max_delay)`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use quizforge_rate_limit::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(*policy.max_retries(), 3);
/// assert_eq!(policy.backoff_delay(2, 0.0), Duration::from_secs(4));
/// ```
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total attempts = `max_retries + 1`.
    max_retries: usize,
    /// Delay before the first retry, pre-jitter.
    base_delay: Duration,
    /// Ceiling on any single backoff delay.
    max_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy from explicit parameters.
    pub fn new(max_retries: usize, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    /// Backoff delay after failed attempt `attempt`, with a jitter offset in
    /// seconds already chosen by the caller.
    pub fn backoff_delay(&self, attempt: usize, jitter_secs: f64) -> Duration {
        let raw = self.base_delay.as_secs_f64() * 2f64.powi(attempt as i32) + jitter_secs;
        Duration::from_secs_f64(raw.min(self.max_delay.as_secs_f64()))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        }
    }
}

/// Execute an async operation, retrying rate-limited failures with backoff.
///
/// The operation runs at most `max_retries + 1` times. A failure whose
/// classification is rate-limit shaped (via [`RetryableError`]) triggers a
/// backoff sleep and another attempt while attempts remain; once attempts
/// are exhausted the error propagates. Any other failure propagates
/// immediately without consuming retry budget. Each attempt is logged with
/// its index and the delay chosen, so a backoff sequence can be asserted
/// from telemetry.
///
/// # Example
///
/// ```rust,ignore
/// let result = execute_with_retry(&policy, || async {
///     client.complete(&prompt).await
/// }).await?;
/// ```
pub async fn execute_with_retry<F, Fut, T, E>(policy: &RetryPolicy, operation: F) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: RetryableError + std::fmt::Display,
{
    let mut attempt: usize = 0;
    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    info!(attempt, "operation recovered after retry");
                }
                return Ok(value);
            }
            Err(e) if e.is_retryable() && attempt < *policy.max_retries() => {
                let jitter: f64 = rand::thread_rng().gen_range(0.0..1.0);
                let delay = policy.backoff_delay(attempt, jitter);
                warn!(
                    attempt,
                    max_attempts = policy.max_retries() + 1,
                    delay_secs = delay.as_secs_f64(),
                    error = %e,
                    "rate limit hit, backing off before retry"
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if e.is_retryable() {
                    warn!(attempt, error = %e, "retries exhausted for rate-limited operation");
                } else {
                    warn!(attempt, error = %e, "permanent error, failing immediately");
                }
                return Err(e);
            }
        }
    }
}
