//! Quizforge - Rate-Limited Quiz Generation over LLM Providers
//!
//! Quizforge wraps every call to an external LLM provider in an adaptive
//! rate-limiting, retry, and fallback layer, and turns the resulting
//! completions into multiple-choice quiz content.
//!
//! # Features
//!
//! - **Budget Tracking**: Sliding one-minute token and request windows with
//!   safety margins below the provider's stated limits
//! - **Retry with Backoff**: Exponential backoff with jitter for rate-limit
//!   shaped failures; permanent errors fail fast
//! - **Fallback Chain**: Simplified LLM call, then a static question bank,
//!   then a generic placeholder, so callers always get content
//! - **Provider Drivers**: Groq chat-completions client behind a
//!   provider-agnostic trait
//! - **TOML Configuration**: Bundled model catalog with user override
//!   precedence
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use quizforge::{
//!     Difficulty, FallbackGenerator, GenerateSpec, GroqClient, QuizGenerator,
//!     QuizforgeConfig, RateLimiter, recommended_model,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = QuizforgeConfig::load()?;
//!     let model = recommended_model();
//!     let limiter = Arc::new(RateLimiter::new(config.profile_for(model).unwrap()));
//!     let driver = Arc::new(GroqClient::new(model)?);
//!
//!     let generator = QuizGenerator::new(Arc::clone(&driver), limiter, config.retry_policy());
//!     let fallback = FallbackGenerator::new(driver);
//!
//!     let spec = GenerateSpec::new("data structures".to_string(), Difficulty::Medium, 5);
//!     let set = match generator.generate(&spec).await {
//!         Ok(set) => set,
//!         Err(_) => fallback.generate(&spec).await,
//!     };
//!     println!("{} questions from {}", set.len(), set.source);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Quizforge is organized as a workspace with focused crates:
//!
//! - `quizforge_core` - Core data types (Question, GenerateSpec, etc.)
//! - `quizforge_error` - Error types and retry classification
//! - `quizforge_rate_limit` - Budget tracking, retry, and configuration
//! - `quizforge_models` - LLM provider drivers
//! - `quizforge_generate` - Prompts, parsing, and the generation pipeline
//!
//! This crate (`quizforge`) re-exports everything for convenience.

#![forbid(unsafe_code)]

pub use quizforge_core::*;
pub use quizforge_error::*;
pub use quizforge_generate::*;
pub use quizforge_models::*;
pub use quizforge_rate_limit::*;
