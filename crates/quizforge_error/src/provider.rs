//! Provider-specific error types and retry classification.

/// Trigger phrases that mark an error message as rate-limit shaped.
///
/// The match is case-insensitive substring containment. Keeping the list as
/// a documented constant makes the retry/no-retry boundary deterministic and
/// independently testable, instead of being coupled to an SDK's wording.
pub const RATE_LIMIT_PHRASES: &[&str] = &["rate limit", "rate_limit", "too many requests"];

/// Returns true when an error message contains a rate-limit indicator.
///
/// # Examples
///
/// ```
/// use quizforge_error::is_rate_limit_message;
///
/// assert!(is_rate_limit_message("Rate limit reached for model"));
/// assert!(is_rate_limit_message("error code rate_limit_exceeded"));
/// assert!(!is_rate_limit_message("invalid api key"));
/// ```
pub fn is_rate_limit_message(message: &str) -> bool {
    let lowered = message.to_lowercase();
    RATE_LIMIT_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}

/// Provider-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderErrorKind {
    /// API key not found in environment
    #[display("GROQ_API_KEY environment variable not set")]
    MissingApiKey,
    /// Failed to build the HTTP client
    #[display("Failed to create provider client: {}", _0)]
    ClientCreation(String),
    /// API request failed
    #[display("Provider API request failed: {}", _0)]
    ApiRequest(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Provider returned a response with no usable content
    #[display("Empty response from provider")]
    EmptyResponse,
}

impl ProviderErrorKind {
    /// Check if this error is rate-limit shaped and should be retried.
    ///
    /// A 429 status is always rate-limit shaped. Other errors are classified
    /// by inspecting the message for the documented trigger phrases; nothing
    /// else is retried.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            ProviderErrorKind::HttpError {
                status_code,
                message,
            } => *status_code == 429 || is_rate_limit_message(message),
            ProviderErrorKind::ApiRequest(message) => is_rate_limit_message(message),
            _ => false,
        }
    }
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use quizforge_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GROQ_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that can be classified as retryable or permanent.
///
/// The retry controller recovers only rate-limit shaped errors locally, via
/// exponential backoff; everything else surfaces to the caller immediately.
///
/// # Example
///
/// ```rust,ignore
/// impl RetryableError for MyError {
///     fn is_retryable(&self) -> bool {
///         match self {
///             MyError::RateLimited => true,
///             MyError::InvalidApiKey => false,
///             MyError::BadRequest => false,
///         }
///     }
/// }
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry with backoff.
    ///
    /// Only rate-limit exhaustion qualifies. Permanent errors like 401
    /// (unauthorized) or 400 (bad request) and parse failures return false.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for ProviderError {
    fn is_retryable(&self) -> bool {
        self.kind.is_rate_limited()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_trigger_phrases_case_insensitively() {
        assert!(is_rate_limit_message("Rate Limit Exceeded"));
        assert!(is_rate_limit_message("RATE_LIMIT"));
        assert!(is_rate_limit_message("Too Many Requests, slow down"));
        assert!(!is_rate_limit_message("model_decommissioned"));
    }

    #[test]
    fn status_429_is_rate_limited_regardless_of_message() {
        let kind = ProviderErrorKind::HttpError {
            status_code: 429,
            message: "quota".to_string(),
        };
        assert!(kind.is_rate_limited());
    }

    #[test]
    fn auth_failures_are_not_retryable() {
        let err = ProviderError::new(ProviderErrorKind::HttpError {
            status_code: 401,
            message: "invalid key".to_string(),
        });
        assert!(!err.is_retryable());
    }
}
