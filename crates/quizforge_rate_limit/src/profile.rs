//! Per-model rate limit profiles.

use crate::error::{RateLimitError, RateLimitErrorKind};

/// Default fraction of the token-per-minute limit the budget may consume.
pub const DEFAULT_TOKEN_SAFETY_MARGIN: f64 = 0.8;

/// Default fraction of the request-per-minute limit the budget may consume.
pub const DEFAULT_REQUEST_SAFETY_MARGIN: f64 = 0.9;

/// Rate limit constraints for one provider model.
///
/// Immutable after construction. The safety margins shrink the effective
/// ceiling below the provider's stated limit so that token estimation error
/// does not trip the provider-side limiter.
///
/// # Examples
///
/// ```
/// use quizforge_rate_limit::RateLimitProfile;
///
/// let profile = RateLimitProfile::new("llama-3.1-8b-instant", 6_000, 30);
/// assert_eq!(profile.safe_token_limit(), 4_800);
/// assert_eq!(profile.safe_request_limit(), 27);
/// ```
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct RateLimitProfile {
    /// Model name this profile applies to.
    model: String,
    /// Provider-stated tokens per minute.
    tokens_per_minute: u64,
    /// Provider-stated requests per minute.
    requests_per_minute: u32,
    /// Fraction of the token limit the budget may consume, in (0, 1].
    token_safety_margin: f64,
    /// Fraction of the request limit the budget may consume, in (0, 1].
    request_safety_margin: f64,
}

impl RateLimitProfile {
    /// Create a profile with the default safety margins.
    pub fn new(model: impl Into<String>, tokens_per_minute: u64, requests_per_minute: u32) -> Self {
        Self {
            model: model.into(),
            tokens_per_minute,
            requests_per_minute,
            token_safety_margin: DEFAULT_TOKEN_SAFETY_MARGIN,
            request_safety_margin: DEFAULT_REQUEST_SAFETY_MARGIN,
        }
    }

    /// Create a profile with explicit safety margins.
    ///
    /// # Errors
    ///
    /// Returns an error if either margin is outside (0, 1].
    pub fn with_margins(
        model: impl Into<String>,
        tokens_per_minute: u64,
        requests_per_minute: u32,
        token_safety_margin: f64,
        request_safety_margin: f64,
    ) -> Result<Self, RateLimitError> {
        for (label, margin) in [
            ("token", token_safety_margin),
            ("request", request_safety_margin),
        ] {
            if margin <= 0.0 || margin > 1.0 {
                return Err(RateLimitError::new(RateLimitErrorKind::InvalidMargin(
                    format!("{} safety margin must be in (0.0, 1.0], got {}", label, margin),
                )));
            }
        }
        Ok(Self {
            model: model.into(),
            tokens_per_minute,
            requests_per_minute,
            token_safety_margin,
            request_safety_margin,
        })
    }

    /// Effective token ceiling: `floor(tokens_per_minute * token_safety_margin)`.
    pub fn safe_token_limit(&self) -> u64 {
        (self.tokens_per_minute as f64 * self.token_safety_margin).floor() as u64
    }

    /// Effective request ceiling: `floor(requests_per_minute * request_safety_margin)`.
    pub fn safe_request_limit(&self) -> u32 {
        (self.requests_per_minute as f64 * self.request_safety_margin).floor() as u32
    }
}
