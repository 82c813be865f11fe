//! Degradation chain: simplified call, static bank, generic placeholder.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::bank::{bank_questions, normalize_topic};
use crate::parse::parse_questions;
use crate::prompt::build_simplified_prompt;
use quizforge_core::{GenerateSpec, Question, QuestionSet, SourceTag};
use quizforge_models::CompletionDriver;

/// Infallible question source for when the primary path has failed.
///
/// Tries one simplified, unthrottled provider call; if that fails for any
/// reason, serves pre-authored questions from the static bank; for topics
/// outside the bank, synthesizes a single generic placeholder. Each rung
/// tags its output so callers can tell degraded content apart.
#[derive(Debug, Clone)]
pub struct FallbackGenerator<D> {
    driver: Arc<D>,
}

impl<D: CompletionDriver> FallbackGenerator<D> {
    /// Create a fallback generator over a driver.
    pub fn new(driver: Arc<D>) -> Self {
        Self { driver }
    }

    /// Produce a question set for the spec. Never fails.
    #[instrument(skip(self), fields(topic = %spec.topic(), count = spec.count()))]
    pub async fn generate(&self, spec: &GenerateSpec) -> QuestionSet {
        match self.try_simplified_call(spec).await {
            Ok(questions) => {
                info!(generated = questions.len(), "fallback LLM call succeeded");
                return QuestionSet::new(questions, SourceTag::FallbackLlm);
            }
            Err(reason) => {
                warn!(%reason, "fallback LLM call failed, using static content");
            }
        }
        Self::static_questions(spec)
    }

    async fn try_simplified_call(&self, spec: &GenerateSpec) -> Result<Vec<Question>, String> {
        let prompt = build_simplified_prompt(spec);
        let completion = self
            .driver
            .complete(&prompt)
            .await
            .map_err(|e| e.to_string())?;
        parse_questions(&completion).map_err(|e| e.to_string())
    }

    /// Static bank lookup, with a generic placeholder as the last resort.
    fn static_questions(spec: &GenerateSpec) -> QuestionSet {
        let key = normalize_topic(spec.topic());
        if let Some(bank) = bank_questions(&key) {
            let questions: Vec<Question> =
                bank.into_iter().take(*spec.count()).collect();
            info!(
                topic_key = %key,
                served = questions.len(),
                "serving static bank questions"
            );
            return QuestionSet::new(questions, SourceTag::StaticBank);
        }

        info!(topic_key = %key, "topic not in bank, serving placeholder");
        QuestionSet::new(vec![Self::placeholder(spec.topic())], SourceTag::Placeholder)
    }

    fn placeholder(topic: &str) -> Question {
        Question::new(
            format!("What is a key concept in {}?", topic),
            vec![
                "Option A".to_string(),
                "Option B".to_string(),
                "Option C".to_string(),
                "Option D".to_string(),
            ],
            "Option A".to_string(),
            format!("This is a basic question about {}", topic),
        )
    }
}
