//! Provider response parsing.

use serde::Deserialize;
use tracing::debug;

use quizforge_core::Question;
use quizforge_error::ParseError;

#[derive(Debug, Deserialize)]
struct QuestionsEnvelope {
    questions: Vec<Question>,
}

/// Strip a leading/trailing markdown code fence from a provider response.
///
/// Models wrap JSON in ```json fences despite instructions not to. Handles
/// the ```json and bare ``` opening variants.
fn strip_code_fences(response: &str) -> &str {
    let mut cleaned = response.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}

/// Parse a provider completion into questions.
///
/// Expects a JSON object of the form `{"questions": [...]}`, possibly
/// wrapped in markdown code fences.
///
/// # Errors
///
/// Returns a [`ParseError`] when the cleaned text is not valid JSON of the
/// expected shape, or when the questions array is empty.
pub fn parse_questions(response: &str) -> Result<Vec<Question>, ParseError> {
    let cleaned = strip_code_fences(response);
    debug!(
        raw_len = response.len(),
        cleaned_len = cleaned.len(),
        "parsing provider response"
    );

    let envelope: QuestionsEnvelope = serde_json::from_str(cleaned)
        .map_err(|e| ParseError::new(format!("Invalid JSON response from provider: {}", e)))?;

    if envelope.questions.is_empty() {
        return Err(ParseError::new("provider returned an empty questions array"));
    }

    debug!(count = envelope.questions.len(), "parsed questions");
    Ok(envelope.questions)
}
