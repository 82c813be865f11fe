//! Budget tracker timing tests, run against Tokio's paused clock.

use std::sync::Arc;
use std::time::Duration;

use quizforge_rate_limit::{RateLimiter, RateLimitProfile, SpacingConfig};
use tokio::time::{Instant, advance};

fn no_spacing_limiter(profile: RateLimitProfile) -> RateLimiter {
    RateLimiter::with_spacing(
        profile,
        SpacingConfig {
            min_secs: 0.0,
            max_secs: 0.0,
        },
    )
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn third_call_waits_when_budget_would_be_exceeded() {
    // tpm=6000 with 0.8 margin: safe limit 4800. Two calls of 2000 fit;
    // 4000 + 2000 > 4800, so the third must wait for the oldest to expire.
    let limiter = no_spacing_limiter(RateLimitProfile::new("llama-3.1-8b-instant", 6_000, 30));

    let start = Instant::now();
    limiter.admit(2_000).await;
    limiter.admit(2_000).await;
    assert_eq!(start.elapsed(), Duration::ZERO);

    limiter.admit(2_000).await;
    let elapsed = start.elapsed();
    assert!(
        elapsed >= Duration::from_secs(59) && elapsed <= Duration::from_secs(61),
        "third call should wait for the window to roll, waited {:?}",
        elapsed
    );

    // After the wait the older entries expired; only the third call remains.
    let usage = limiter.usage().await;
    assert_eq!(usage.tokens_in_window, 2_000);
    assert_eq!(usage.requests_in_window, 1);
}

#[tokio::test(start_paused = true)]
async fn usage_expires_after_window_rolls() {
    let limiter = no_spacing_limiter(RateLimitProfile::new("llama-3.1-8b-instant", 6_000, 30));

    limiter.admit(4_000).await;

    advance(Duration::from_secs(59)).await;
    assert_eq!(limiter.usage().await.tokens_in_window, 4_000);

    advance(Duration::from_secs(2)).await;
    assert_eq!(limiter.usage().await.tokens_in_window, 0);

    // With the window empty again a large call is admitted immediately.
    let start = Instant::now();
    limiter.admit(4_000).await;
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn request_ceiling_triggers_wait() {
    // rpm=2 with 0.9 margin floors to a single safe request per minute.
    let limiter = no_spacing_limiter(RateLimitProfile::new("tiny-model", 1_000_000, 2));

    let start = Instant::now();
    limiter.admit(10).await;
    assert_eq!(start.elapsed(), Duration::ZERO);

    limiter.admit(10).await;
    assert!(start.elapsed() >= Duration::from_secs(59));
}

#[tokio::test(start_paused = true)]
async fn concurrent_admissions_serialize_against_one_budget() {
    // Each call alone fits under the 4800 safe limit, but together they do
    // not; exactly one of the two concurrent callers must wait.
    let limiter = Arc::new(no_spacing_limiter(RateLimitProfile::new(
        "llama-3.1-8b-instant",
        6_000,
        30,
    )));

    let start = Instant::now();
    let a = tokio::spawn({
        let limiter = Arc::clone(&limiter);
        async move { limiter.admit(3_000).await }
    });
    let b = tokio::spawn({
        let limiter = Arc::clone(&limiter);
        async move { limiter.admit(3_000).await }
    });
    a.await.unwrap();
    b.await.unwrap();

    assert!(
        start.elapsed() >= Duration::from_secs(59),
        "both admissions passed without a wait: {:?}",
        start.elapsed()
    );
}

#[tokio::test(start_paused = true)]
async fn oversized_estimate_gets_floor_wait_on_empty_window() {
    // A single estimate above the ceiling can never fit; the tracker applies
    // the minimum floor wait and admits it anyway rather than deadlocking.
    let limiter = no_spacing_limiter(RateLimitProfile::new("llama-3.1-8b-instant", 6_000, 30));

    let start = Instant::now();
    limiter.admit(10_000).await;
    assert_eq!(start.elapsed(), Duration::from_secs(1));
    assert_eq!(limiter.usage().await.tokens_in_window, 10_000);
}

#[tokio::test(start_paused = true)]
async fn throttle_applies_spacing_within_bounds() {
    let limiter = RateLimiter::new(RateLimitProfile::new("llama-3.1-8b-instant", 6_000, 30));

    let start = Instant::now();
    limiter.throttle(100).await;
    let elapsed = start.elapsed();

    // No budget wait, so the elapsed time is the spacing delay alone.
    assert!(
        elapsed >= Duration::from_secs_f64(0.5) && elapsed <= Duration::from_secs_f64(1.0),
        "spacing outside [0.5s, 1.0s]: {:?}",
        elapsed
    );
}

#[tokio::test(start_paused = true)]
async fn abandoned_wait_commits_no_usage() {
    let limiter = Arc::new(no_spacing_limiter(RateLimitProfile::new(
        "llama-3.1-8b-instant",
        6_000,
        30,
    )));

    limiter.admit(4_000).await;

    // This admission must wait; drop it mid-suspension.
    let waiting = tokio::spawn({
        let limiter = Arc::clone(&limiter);
        async move { limiter.admit(2_000).await }
    });
    tokio::task::yield_now().await;
    waiting.abort();
    let _ = waiting.await;

    assert_eq!(limiter.usage().await.tokens_in_window, 4_000);
    assert_eq!(limiter.usage().await.requests_in_window, 1);
}
