//! LLM provider drivers for Quizforge.
//!
//! This crate provides the [`CompletionDriver`] trait that the generation
//! layer programs against, plus the Groq client implementation. Drivers are
//! deliberately thin: they take a rendered prompt, return the raw completion
//! text, and map transport failures into [`quizforge_error::ProviderError`]
//! so the retry controller can classify them.
//!
//! # Example
//!
//! ```no_run
//! use quizforge_models::{CompletionDriver, GroqClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GroqClient::new("llama-3.1-8b-instant")?;
//! let answer = client.complete("Write one quiz question about Rust.").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod driver;
mod groq;

pub use driver::CompletionDriver;
pub use groq::GroqClient;
