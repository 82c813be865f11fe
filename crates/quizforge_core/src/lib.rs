//! Core data types for the Quizforge quiz generation library.
//!
//! This crate provides the foundation data types used across all Quizforge
//! interfaces: question content, generation requests, token estimation, and
//! telemetry initialization.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod question;
mod request;
mod telemetry;
mod token_counting;

pub use question::{Difficulty, Question, QuestionSet, SourceTag};
pub use request::GenerateSpec;
pub use telemetry::{init_telemetry, shutdown_telemetry};
pub use token_counting::{DEFAULT_COMPLETION_ESTIMATE, estimate_request_tokens, estimate_tokens};
