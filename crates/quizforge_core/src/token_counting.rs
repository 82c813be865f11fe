//! Conservative token estimation for rate limiting.
//!
//! The budget tracker charges estimated cost before a call executes, so the
//! estimate only needs to be stable and conservative, not exact. Four
//! characters per token tracks the published tokenizer averages closely
//! enough for quota purposes.

/// Expected completion size, in tokens, when the caller has no better guess.
pub const DEFAULT_COMPLETION_ESTIMATE: u64 = 1_000;

/// Estimate token count from text (chars / 4, minimum 1).
///
/// # Examples
///
/// ```
/// use quizforge_core::estimate_tokens;
///
/// assert_eq!(estimate_tokens("abcdefgh"), 2);
/// assert_eq!(estimate_tokens(""), 1);
/// ```
pub fn estimate_tokens(text: &str) -> u64 {
    (text.len() / 4).max(1) as u64
}

/// Estimate total cost of a request: prompt tokens plus expected completion.
pub fn estimate_request_tokens(prompt: &str, expected_completion: u64) -> u64 {
    estimate_tokens(prompt) + expected_completion
}
