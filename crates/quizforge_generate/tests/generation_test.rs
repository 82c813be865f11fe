//! End-to-end generation pipeline tests with a scripted driver.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quizforge_core::{Difficulty, GenerateSpec, SourceTag};
use quizforge_error::{ProviderError, ProviderErrorKind, QuizforgeResult};
use quizforge_generate::{FallbackGenerator, QuizGenerator};
use quizforge_models::CompletionDriver;
use quizforge_rate_limit::{RateLimitProfile, RateLimiter, RetryPolicy, SpacingConfig};

const VALID_RESPONSE: &str = r#"{
    "questions": [{
        "question_text": "Which keyword defines a function in Python?",
        "options": ["function", "def", "func", "define"],
        "correct_answer": "def",
        "explanation": "The 'def' keyword defines functions in Python"
    }]
}"#;

/// Driver returning a scripted sequence of completions or failures.
struct ScriptedDriver {
    script: Mutex<VecDeque<QuizforgeResult<String>>>,
    calls: Mutex<usize>,
}

impl ScriptedDriver {
    fn new(script: Vec<QuizforgeResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(0),
        })
    }

    fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl CompletionDriver for ScriptedDriver {
    async fn complete(&self, _prompt: &str) -> QuizforgeResult<String> {
        *self.calls.lock().unwrap() += 1;
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(VALID_RESPONSE.to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "test-model"
    }
}

fn rate_limited_error() -> QuizforgeResult<String> {
    Err(ProviderError::new(ProviderErrorKind::HttpError {
        status_code: 429,
        message: "rate limit exceeded".to_string(),
    })
    .into())
}

fn bad_request_error() -> QuizforgeResult<String> {
    Err(ProviderError::new(ProviderErrorKind::HttpError {
        status_code: 400,
        message: "malformed request".to_string(),
    })
    .into())
}

fn test_limiter() -> Arc<RateLimiter> {
    let limiter = RateLimiter::with_spacing(
        RateLimitProfile::new("test-model", 1_000_000, 1_000),
        SpacingConfig {
            min_secs: 0.0,
            max_secs: 0.0,
        },
    )
    .unwrap();
    Arc::new(limiter)
}

fn spec(topic: &str, count: usize) -> GenerateSpec {
    GenerateSpec::new(topic.to_string(), Difficulty::Medium, count)
}

#[tokio::test(start_paused = true)]
async fn primary_path_tags_questions_as_primary() {
    let driver = ScriptedDriver::new(vec![Ok(VALID_RESPONSE.to_string())]);
    let generator = QuizGenerator::new(Arc::clone(&driver), test_limiter(), RetryPolicy::default());

    let set = generator.generate(&spec("python", 1)).await.unwrap();

    assert_eq!(set.source, SourceTag::Primary);
    assert_eq!(set.len(), 1);
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn rate_limited_call_is_retried_until_success() {
    let driver = ScriptedDriver::new(vec![
        rate_limited_error(),
        rate_limited_error(),
        Ok(VALID_RESPONSE.to_string()),
    ]);
    let generator = QuizGenerator::new(Arc::clone(&driver), test_limiter(), RetryPolicy::default());

    let set = generator.generate(&spec("python", 1)).await.unwrap();

    assert_eq!(set.source, SourceTag::Primary);
    assert_eq!(driver.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn permanent_provider_error_is_not_retried() {
    let driver = ScriptedDriver::new(vec![bad_request_error()]);
    let generator = QuizGenerator::new(Arc::clone(&driver), test_limiter(), RetryPolicy::default());

    let result = generator.generate(&spec("python", 1)).await;

    assert!(result.is_err());
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_surface_the_provider_error() {
    let driver = ScriptedDriver::new(vec![
        rate_limited_error(),
        rate_limited_error(),
        rate_limited_error(),
        rate_limited_error(),
    ]);
    let generator = QuizGenerator::new(Arc::clone(&driver), test_limiter(), RetryPolicy::default());

    let result = generator.generate(&spec("python", 1)).await;

    assert!(result.is_err());
    // default policy: 1 initial attempt + 3 retries
    assert_eq!(driver.call_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn unparseable_completion_is_a_parse_error_not_a_retry() {
    let driver = ScriptedDriver::new(vec![Ok("Sure, here are your questions!".to_string())]);
    let generator = QuizGenerator::new(Arc::clone(&driver), test_limiter(), RetryPolicy::default());

    let result = generator.generate(&spec("python", 1)).await;

    assert!(result.is_err());
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn fenced_completion_still_parses() {
    let fenced = format!("```json\n{}\n```", VALID_RESPONSE);
    let driver = ScriptedDriver::new(vec![Ok(fenced)]);
    let generator = QuizGenerator::new(Arc::clone(&driver), test_limiter(), RetryPolicy::default());

    let set = generator.generate(&spec("python", 1)).await.unwrap();
    assert_eq!(set.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn fallback_llm_success_tags_fallback_llm() {
    let driver = ScriptedDriver::new(vec![Ok(VALID_RESPONSE.to_string())]);
    let fallback = FallbackGenerator::new(Arc::clone(&driver));

    let set = fallback.generate(&spec("python", 1)).await;

    assert_eq!(set.source, SourceTag::FallbackLlm);
    assert_eq!(set.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_fallback_call_serves_the_static_bank() {
    let driver = ScriptedDriver::new(vec![rate_limited_error()]);
    let fallback = FallbackGenerator::new(Arc::clone(&driver));

    let set = fallback.generate(&spec("python", 2)).await;

    assert_eq!(set.source, SourceTag::StaticBank);
    assert_eq!(set.len(), 2);
    assert_eq!(driver.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn bank_serves_at_most_the_requested_count() {
    let driver = ScriptedDriver::new(vec![bad_request_error()]);
    let fallback = FallbackGenerator::new(driver);

    let set = fallback.generate(&spec("Data Structures", 1)).await;

    assert_eq!(set.source, SourceTag::StaticBank);
    assert_eq!(set.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn unknown_topic_gets_a_placeholder() {
    let driver = ScriptedDriver::new(vec![rate_limited_error()]);
    let fallback = FallbackGenerator::new(driver);

    let set = fallback.generate(&spec("quantum_foo", 3)).await;

    assert_eq!(set.source, SourceTag::Placeholder);
    assert!(!set.is_empty());
    assert!(set.questions[0].question_text.contains("quantum_foo"));
}

#[tokio::test(start_paused = true)]
async fn unparseable_fallback_completion_degrades_to_static_content() {
    let driver = ScriptedDriver::new(vec![Ok("not json".to_string())]);
    let fallback = FallbackGenerator::new(driver);

    let set = fallback.generate(&spec("machine learning", 2)).await;

    assert_eq!(set.source, SourceTag::StaticBank);
    assert_eq!(set.len(), 2);
}
