//! Top-level error wrapper types.

use crate::{ConfigError, ParseError, ProviderError, RetryableError};

/// This is the foundation error enum. Additional variants will be added
/// by other quizforge crates as the workspace grows.
///
/// # Examples
///
/// ```
/// use quizforge_error::{QuizforgeError, ConfigError};
///
/// let cfg_err = ConfigError::new("bad margins");
/// let err: QuizforgeError = cfg_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum QuizforgeErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Provider (LLM API) error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Content parsing error
    #[from(ParseError)]
    Parse(ParseError),
}

/// Quizforge error with kind discrimination.
///
/// # Examples
///
/// ```
/// use quizforge_error::{QuizforgeResult, ConfigError};
///
/// fn might_fail() -> QuizforgeResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Quizforge Error: {}", _0)]
pub struct QuizforgeError(Box<QuizforgeErrorKind>);

impl QuizforgeError {
    /// Create a new error from a kind.
    pub fn new(kind: QuizforgeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &QuizforgeErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to QuizforgeErrorKind
impl<T> From<T> for QuizforgeError
where
    T: Into<QuizforgeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

impl RetryableError for QuizforgeError {
    /// Only the provider variant can be rate-limit shaped; config and parse
    /// failures always propagate without retry.
    fn is_retryable(&self) -> bool {
        match self.kind() {
            QuizforgeErrorKind::Provider(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// Result type for Quizforge operations.
///
/// # Examples
///
/// ```
/// use quizforge_error::{QuizforgeResult, ParseError};
///
/// fn decode() -> QuizforgeResult<String> {
///     Err(ParseError::new("unterminated JSON object"))?
/// }
/// ```
pub type QuizforgeResult<T> = std::result::Result<T, QuizforgeError>;
