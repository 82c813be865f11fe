//! Error types for the Quizforge library.
//!
//! This crate provides the foundation error types used throughout the
//! Quizforge ecosystem.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use quizforge_error::{QuizforgeResult, ConfigError};
//!
//! fn load_limits() -> QuizforgeResult<String> {
//!     Err(ConfigError::new("missing model table"))?
//! }
//!
//! match load_limits() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod parse;
mod provider;

pub use config::ConfigError;
pub use error::{QuizforgeError, QuizforgeErrorKind, QuizforgeResult};
pub use parse::ParseError;
pub use provider::{
    ProviderError, ProviderErrorKind, RATE_LIMIT_PHRASES, RetryableError, is_rate_limit_message,
};
