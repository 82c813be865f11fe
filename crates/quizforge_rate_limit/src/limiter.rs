//! Sliding-window budget tracker and throttle.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

use crate::config::SpacingConfig;
use crate::error::RateLimitError;
use crate::profile::RateLimitProfile;
use crate::retry::{RetryPolicy, execute_with_retry};
use crate::window::UsageWindow;
use quizforge_error::RetryableError;

/// Trailing span both usage windows cover.
pub const WINDOW_SPAN: Duration = Duration::from_secs(60);

/// Floor wait applied when the budget is exceeded but the window is empty,
/// which can only happen when a single call's estimate exceeds the ceiling.
const MIN_FLOOR_WAIT: Duration = Duration::from_secs(1);

/// Token and request usage inside the current window.
struct UsageState {
    tokens: UsageWindow,
    requests: UsageWindow,
}

/// Point-in-time view of window usage, for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageSnapshot {
    /// Sum of estimated tokens recorded in the trailing window.
    pub tokens_in_window: u64,
    /// Number of requests recorded in the trailing window.
    pub requests_in_window: usize,
}

/// Budget tracker over sliding one-minute token and request windows.
///
/// The limiter decides whether a call of estimated cost `c` tokens can
/// proceed immediately or must wait, applying the profile's safety margins
/// below the provider's stated limits. State is process-wide: construct one
/// limiter at startup and share it (`Arc`) across call sites so every caller
/// draws on the same budget. There is no persistence; usage resets as
/// entries age out of the window.
///
/// Both windows live behind a single async lock. The whole
/// admit-wait-record sequence holds that lock, so two concurrent admissions
/// can never both pass a check against the same soon-to-be-exceeded budget
/// before either records its usage. A caller dropped while suspended
/// releases the lock without recording anything.
///
/// # Example
///
/// ```rust,ignore
/// use quizforge_rate_limit::{RateLimiter, RateLimitProfile};
///
/// let limiter = RateLimiter::new(RateLimitProfile::new("llama-3.1-8b-instant", 6_000, 30));
/// limiter.throttle(1_000).await;
/// // Make API call...
/// ```
pub struct RateLimiter {
    profile: RateLimitProfile,
    spacing: SpacingConfig,
    usage: Mutex<UsageState>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("model", self.profile.model())
            .field("safe_token_limit", &self.profile.safe_token_limit())
            .field("safe_request_limit", &self.profile.safe_request_limit())
            .finish_non_exhaustive()
    }
}

impl RateLimiter {
    /// Create a limiter with default inter-request spacing.
    pub fn new(profile: RateLimitProfile) -> Self {
        info!(
            model = %profile.model(),
            tpm = profile.tokens_per_minute(),
            rpm = profile.requests_per_minute(),
            "rate limiter initialized"
        );
        Self {
            profile,
            spacing: SpacingConfig::default(),
            usage: Mutex::new(UsageState {
                tokens: UsageWindow::new(WINDOW_SPAN),
                requests: UsageWindow::new(WINDOW_SPAN),
            }),
        }
    }

    /// Create a limiter with explicit spacing bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the spacing bounds are inconsistent.
    pub fn with_spacing(
        profile: RateLimitProfile,
        spacing: SpacingConfig,
    ) -> Result<Self, RateLimitError> {
        spacing.validate()?;
        let mut limiter = Self::new(profile);
        limiter.spacing = spacing;
        Ok(limiter)
    }

    /// The profile this limiter enforces.
    pub fn profile(&self) -> &RateLimitProfile {
        &self.profile
    }

    /// Suspend until the budget admits a call of `estimated_tokens`, then
    /// record it and apply randomized inter-request spacing.
    ///
    /// The spacing delay is independent of the budget verdict; it spreads
    /// out callers that were admitted simultaneously. It is applied after
    /// the usage record is committed and outside the lock, so it does not
    /// serialize other admissions.
    pub async fn throttle(&self, estimated_tokens: u64) {
        self.admit(estimated_tokens).await;
        let spacing = self.spacing.sample();
        debug!(spacing_secs = spacing.as_secs_f64(), "inter-request spacing");
        sleep(spacing).await;
    }

    /// Suspend until the budget admits the call, then record it.
    ///
    /// Purges both windows, computes the single required wait from the
    /// oldest surviving entries, sleeps it out, and purges again. The usage
    /// record is appended exactly once, only after the wait resolves; a
    /// caller cancelled mid-wait commits nothing.
    pub async fn admit(&self, estimated_tokens: u64) {
        let mut usage = self.usage.lock().await;

        let now = Instant::now();
        usage.tokens.prune(now);
        usage.requests.prune(now);

        let wait = self.required_wait(&usage, estimated_tokens, now);
        if !wait.is_zero() {
            info!(
                wait_secs = wait.as_secs_f64(),
                tokens_in_window = usage.tokens.total_cost(),
                safe_token_limit = self.profile.safe_token_limit(),
                requests_in_window = usage.requests.len(),
                safe_request_limit = self.profile.safe_request_limit(),
                "rate limit protection: waiting"
            );
            sleep(wait).await;

            // Expired entries accumulated during the wait.
            let now = Instant::now();
            usage.tokens.prune(now);
            usage.requests.prune(now);
        }

        let now = Instant::now();
        usage.tokens.record(now, estimated_tokens);
        usage.requests.record(now, 1);
        debug!(
            estimated_tokens,
            tokens_in_window = usage.tokens.total_cost(),
            requests_in_window = usage.requests.len(),
            "call admitted"
        );
    }

    /// Wait implied by the current windows for a call of `estimated_tokens`.
    ///
    /// Zero when both the token and request budgets admit the call. When a
    /// budget is exceeded, the wait runs until the oldest entry in the
    /// offending window ages out; the result is the maximum over both
    /// dimensions.
    fn required_wait(&self, usage: &UsageState, estimated_tokens: u64, now: Instant) -> Duration {
        let mut wait = Duration::ZERO;

        if usage.tokens.total_cost() + estimated_tokens > self.profile.safe_token_limit() {
            let token_wait = match usage.tokens.oldest() {
                Some(oldest) => (oldest + WINDOW_SPAN).saturating_duration_since(now),
                None => MIN_FLOOR_WAIT,
            };
            wait = wait.max(token_wait);
        }

        if usage.requests.len() as u32 >= self.profile.safe_request_limit() {
            let request_wait = match usage.requests.oldest() {
                Some(oldest) => (oldest + WINDOW_SPAN).saturating_duration_since(now),
                None => MIN_FLOOR_WAIT,
            };
            wait = wait.max(request_wait);
        }

        wait
    }

    /// Throttle, then execute the operation with retry on rate-limit errors.
    ///
    /// This is the full upward contract: scheduler, then retry controller.
    /// When retries are exhausted the final error propagates; falling back
    /// to degraded content is the caller's decision, not the limiter's.
    pub async fn execute<F, Fut, T, E>(
        &self,
        estimated_tokens: u64,
        policy: &RetryPolicy,
        operation: F,
    ) -> Result<T, E>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        E: RetryableError + std::fmt::Display,
    {
        self.throttle(estimated_tokens).await;
        execute_with_retry(policy, operation).await
    }

    /// Current usage inside the trailing window.
    pub async fn usage(&self) -> UsageSnapshot {
        let mut usage = self.usage.lock().await;
        let now = Instant::now();
        usage.tokens.prune(now);
        usage.requests.prune(now);
        UsageSnapshot {
            tokens_in_window: usage.tokens.total_cost(),
            requests_in_window: usage.requests.len(),
        }
    }
}
