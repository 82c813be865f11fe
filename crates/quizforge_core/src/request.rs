//! Generation request types.

use crate::Difficulty;
use serde::{Deserialize, Serialize};

/// What the caller wants generated.
///
/// # Examples
///
/// ```
/// use quizforge_core::{Difficulty, GenerateSpec};
///
/// let spec = GenerateSpec::new("data structures".to_string(), Difficulty::Medium, 5);
/// assert_eq!(*spec.count(), 5);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_new::new,
    derive_getters::Getters,
)]
pub struct GenerateSpec {
    /// Quiz topic, as entered by the admin.
    topic: String,
    /// Requested difficulty level.
    difficulty: Difficulty,
    /// Number of questions to produce.
    count: usize,
}
