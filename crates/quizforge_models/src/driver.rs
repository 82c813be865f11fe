//! Provider-agnostic completion interface.

use async_trait::async_trait;
use quizforge_error::QuizforgeResult;

/// A driver that turns a prompt into completion text.
///
/// The generation layer holds drivers behind this trait so the primary model,
/// the fallback model, and test doubles are interchangeable. Implementations
/// must be safe to share across tasks; clients here are cheap to clone and
/// hold no per-request state.
#[async_trait]
pub trait CompletionDriver: Send + Sync {
    /// Send the prompt and return the raw completion text.
    ///
    /// # Errors
    ///
    /// Returns a provider error for transport failures, non-success HTTP
    /// statuses, and responses with no usable content.
    async fn complete(&self, prompt: &str) -> QuizforgeResult<String>;

    /// Short provider identifier for logs ("groq").
    fn provider_name(&self) -> &'static str;

    /// Model this driver is bound to.
    fn model_name(&self) -> &str;
}
