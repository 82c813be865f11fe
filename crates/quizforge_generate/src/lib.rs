//! Quiz question generation pipeline.
//!
//! Composes the provider driver, the rate limiting core, and response
//! parsing into the two entry points the backend uses:
//!
//! - [`QuizGenerator::generate`]: the primary path, a throttled, retried
//!   provider call whose output is parsed into a [`quizforge_core::QuestionSet`].
//!   Can fail; the caller decides whether to degrade.
//! - [`FallbackGenerator::generate`]: the degradation chain, one simplified
//!   provider call, then the static question bank, then a generic
//!   placeholder. Never fails; every set carries a provenance tag.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use quizforge_core::{Difficulty, GenerateSpec};
//! use quizforge_generate::{FallbackGenerator, QuizGenerator};
//!
//! let spec = GenerateSpec::new("data structures".to_string(), Difficulty::Medium, 5);
//! let set = match generator.generate(&spec).await {
//!     Ok(set) => set,
//!     Err(_) => fallback.generate(&spec).await,
//! };
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bank;
mod fallback;
mod generator;
mod parse;
mod prompt;

pub use bank::{bank_questions, normalize_topic};
pub use fallback::FallbackGenerator;
pub use generator::QuizGenerator;
pub use parse::parse_questions;
pub use prompt::{build_prompt, build_simplified_prompt};
