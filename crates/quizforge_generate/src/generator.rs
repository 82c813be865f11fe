//! Primary generation path: throttle, call, retry, parse.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::parse::parse_questions;
use crate::prompt::build_prompt;
use quizforge_core::{
    DEFAULT_COMPLETION_ESTIMATE, GenerateSpec, QuestionSet, SourceTag, estimate_request_tokens,
};
use quizforge_error::QuizforgeResult;
use quizforge_models::CompletionDriver;
use quizforge_rate_limit::{RateLimiter, RetryPolicy};

/// Throttled, retried quiz generation against a provider driver.
///
/// Every provider call goes through the shared [`RateLimiter`] first and is
/// retried on rate-limit shaped failures per the [`RetryPolicy`]. The
/// generator itself can fail; callers hold a [`crate::FallbackGenerator`]
/// for the degraded path.
#[derive(Debug, Clone)]
pub struct QuizGenerator<D> {
    driver: Arc<D>,
    limiter: Arc<RateLimiter>,
    policy: RetryPolicy,
}

impl<D: CompletionDriver> QuizGenerator<D> {
    /// Create a generator over a driver and a shared limiter.
    pub fn new(driver: Arc<D>, limiter: Arc<RateLimiter>, policy: RetryPolicy) -> Self {
        Self {
            driver,
            limiter,
            policy,
        }
    }

    /// Generate a question set for the spec.
    ///
    /// The request is charged against the budget at its estimated cost
    /// (prompt tokens plus an expected completion) before the call executes.
    /// Rate-limit failures are retried with backoff; everything else, parse
    /// failures included, propagates.
    ///
    /// # Errors
    ///
    /// Returns the final provider error once retries are exhausted, or a
    /// parse error when the completion is not usable quiz content.
    #[instrument(skip(self), fields(
        provider = self.driver.provider_name(),
        model = self.driver.model_name(),
        topic = %spec.topic(),
        count = spec.count(),
    ))]
    pub async fn generate(&self, spec: &GenerateSpec) -> QuizforgeResult<QuestionSet> {
        let prompt = build_prompt(spec);
        let estimated = estimate_request_tokens(&prompt, DEFAULT_COMPLETION_ESTIMATE);

        let completion = self
            .limiter
            .execute(estimated, &self.policy, || self.driver.complete(&prompt))
            .await?;

        let questions = parse_questions(&completion)?;
        info!(generated = questions.len(), "quiz questions generated");
        Ok(QuestionSet::new(questions, SourceTag::Primary))
    }
}
