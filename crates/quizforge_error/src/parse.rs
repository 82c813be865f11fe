//! Content parsing error types.
//!
//! Raised when raw provider text cannot be interpreted as quiz content.
//! Parse failures are never retried by the rate limiting core; they surface
//! to the caller, which may elect to fall back.

/// Parse error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Parse Error: {} at line {} in {}", message, line, file)]
pub struct ParseError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ParseError {
    /// Create a new ParseError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use quizforge_error::ParseError;
    ///
    /// let err = ParseError::new("response is not valid JSON");
    /// assert!(err.message.contains("valid JSON"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
