//! Rate limiting and retry for LLM API calls.
//!
//! This crate is the throttling core of Quizforge. Every provider call flows
//! through it:
//!
//! 1. The [`RateLimiter`] tracks a sliding one-minute budget of tokens and
//!    requests, with safety margins below the provider's stated limits, and
//!    suspends callers until the budget admits their estimated cost.
//! 2. [`execute_with_retry`] re-invokes the operation with exponential
//!    backoff and jitter when the failure is rate-limit shaped, up to a
//!    bounded retry count; any other failure propagates immediately.
//!
//! Limits are loaded from TOML configuration with bundled defaults and user
//! overrides, keyed by model name. The limiter is an explicitly constructed
//! component: create one at process start and share it by reference, so all
//! call sites draw on the same budget.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod limiter;
mod profile;
mod retry;
mod window;

pub use config::{
    MarginConfig, ModelLimitConfig, QuizforgeConfig, RetryConfig, SpacingConfig, recommended_model,
};
pub use error::{RateLimitError, RateLimitErrorKind};
pub use limiter::{RateLimiter, UsageSnapshot, WINDOW_SPAN};
pub use profile::{
    DEFAULT_REQUEST_SAFETY_MARGIN, DEFAULT_TOKEN_SAFETY_MARGIN, RateLimitProfile,
};
pub use retry::{RetryPolicy, execute_with_retry};
pub use window::UsageWindow;
