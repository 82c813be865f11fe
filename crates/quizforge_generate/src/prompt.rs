//! Prompt construction for quiz generation.

use quizforge_core::GenerateSpec;

/// Render the full generation prompt for the primary path.
///
/// Asks for strict JSON with no markdown wrapping; the parser still strips
/// code fences because models ignore that instruction often enough.
pub fn build_prompt(spec: &GenerateSpec) -> String {
    format!(
        r#"Generate {count} multiple choice questions about {topic} with {difficulty} difficulty.

Requirements:
1. Each question should have exactly 4 options
2. Only one correct answer per question
3. Questions should be clear and unambiguous
4. Difficulty should match the specified level ({difficulty})
5. Questions should be relevant to the topic: {topic}
6. Include a mix of factual and conceptual questions

IMPORTANT: Return ONLY valid JSON with no additional text, markdown, or explanations.
Do not wrap the response in code blocks or add any formatting.

Return the questions in this exact JSON format:
{{
    "questions": [
        {{
            "question_text": "Question text here",
            "options": ["Option A", "Option B", "Option C", "Option D"],
            "correct_answer": "Option A",
            "explanation": "Brief explanation of the correct answer"
        }}
    ]
}}"#,
        count = spec.count(),
        topic = spec.topic(),
        difficulty = spec.difficulty(),
    )
}

/// Render the shorter prompt used by the fallback path.
///
/// Smaller and less demanding than the primary prompt: when the primary
/// path has already failed, the degraded call should cost fewer tokens and
/// give the model less to get wrong.
pub fn build_simplified_prompt(spec: &GenerateSpec) -> String {
    format!(
        r#"Write {count} {difficulty} multiple choice questions about {topic}.
Each question has 4 options, one correct answer, and a one-sentence explanation.

Respond with only this JSON, nothing else:
{{"questions": [{{"question_text": "...", "options": ["...", "...", "...", "..."], "correct_answer": "...", "explanation": "..."}}]}}"#,
        count = spec.count(),
        topic = spec.topic(),
        difficulty = spec.difficulty(),
    )
}
