//! Quiz question content types.

use serde::{Deserialize, Serialize};

/// Requested difficulty for generated questions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Introductory questions.
    Easy,
    /// Standard questions.
    Medium,
    /// Advanced questions.
    Hard,
}

/// A single multiple-choice question.
///
/// Four options, exactly one correct answer, and a short explanation. This is
/// the shape the provider is asked to emit and the shape the static bank
/// stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct Question {
    /// The question prompt shown to the student.
    pub question_text: String,
    /// Candidate answers, exactly one of which is correct.
    pub options: Vec<String>,
    /// The correct answer, verbatim from `options`.
    pub correct_answer: String,
    /// Brief explanation of the correct answer.
    pub explanation: String,
}

/// Which path produced a set of questions.
///
/// Callers of the full generation chain receive real LLM-backed content,
/// degraded single-call content, or canned content, distinguishable by this
/// tag, but never an unhandled error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    /// Full throttled-and-retried provider call.
    #[display("primary")]
    Primary,
    /// Simplified single-shot provider call.
    #[display("fallback LLM")]
    FallbackLlm,
    /// Pre-authored question from the static bank.
    #[display("static bank")]
    StaticBank,
    /// Synthesized generic question referencing the topic.
    #[display("generic placeholder")]
    Placeholder,
}

/// A batch of generated questions with provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct QuestionSet {
    /// The generated questions, in presentation order.
    pub questions: Vec<Question>,
    /// Which generation path produced them.
    pub source: SourceTag,
}

impl QuestionSet {
    /// Number of questions in the set.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// True when the set contains no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_round_trips_through_serde() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let back: Difficulty = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Difficulty::Medium);
    }

    #[test]
    fn source_tag_displays_human_readable_label() {
        assert_eq!(SourceTag::StaticBank.to_string(), "static bank");
        assert_eq!(SourceTag::FallbackLlm.to_string(), "fallback LLM");
    }

    #[test]
    fn question_deserializes_from_provider_shape() {
        let raw = r#"{
            "question_text": "Which keyword defines a function in Python?",
            "options": ["function", "def", "func", "define"],
            "correct_answer": "def",
            "explanation": "The 'def' keyword is used to define functions in Python"
        }"#;
        let q: Question = serde_json::from_str(raw).unwrap();
        assert_eq!(q.options.len(), 4);
        assert_eq!(q.correct_answer, "def");
    }
}
