//! Static question bank, the second rung of the fallback chain.

use quizforge_core::Question;

/// Normalize a topic into a bank key: lowercase, spaces to underscores.
///
/// # Examples
///
/// ```
/// use quizforge_generate::normalize_topic;
///
/// assert_eq!(normalize_topic("Machine Learning"), "machine_learning");
/// assert_eq!(normalize_topic("python"), "python");
/// ```
pub fn normalize_topic(topic: &str) -> String {
    topic.trim().to_lowercase().replace(' ', "_")
}

/// Pre-authored questions for a topic, or `None` for topics outside the bank.
///
/// Keys are normalized topic strings, so lookups must go through
/// [`normalize_topic`].
pub fn bank_questions(topic_key: &str) -> Option<Vec<Question>> {
    match topic_key {
        "python" => Some(vec![
            Question::new(
                "What is the correct syntax to create a list in Python?".to_string(),
                vec![
                    "list()".to_string(),
                    "[]".to_string(),
                    "new list()".to_string(),
                    "List()".to_string(),
                ],
                "[]".to_string(),
                "In Python, lists are created using square brackets []".to_string(),
            ),
            Question::new(
                "Which keyword is used to define a function in Python?".to_string(),
                vec![
                    "function".to_string(),
                    "def".to_string(),
                    "func".to_string(),
                    "define".to_string(),
                ],
                "def".to_string(),
                "The 'def' keyword is used to define functions in Python".to_string(),
            ),
        ]),
        "machine_learning" => Some(vec![
            Question::new(
                "What is supervised learning?".to_string(),
                vec![
                    "Learning without labels".to_string(),
                    "Learning with labeled data".to_string(),
                    "Learning from rewards".to_string(),
                    "Learning without data".to_string(),
                ],
                "Learning with labeled data".to_string(),
                "Supervised learning uses labeled training data to learn patterns".to_string(),
            ),
            Question::new(
                "What is the purpose of training data in machine learning?".to_string(),
                vec![
                    "To test the model".to_string(),
                    "To train the model".to_string(),
                    "To validate the model".to_string(),
                    "To deploy the model".to_string(),
                ],
                "To train the model".to_string(),
                "Training data is used to teach the model patterns and relationships".to_string(),
            ),
        ]),
        "data_structures" => Some(vec![
            Question::new(
                "What is the time complexity of accessing an element in an array?".to_string(),
                vec![
                    "O(n)".to_string(),
                    "O(log n)".to_string(),
                    "O(1)".to_string(),
                    "O(n²)".to_string(),
                ],
                "O(1)".to_string(),
                "Array access is constant time O(1) using index".to_string(),
            ),
            Question::new(
                "Which data structure follows LIFO principle?".to_string(),
                vec![
                    "Queue".to_string(),
                    "Stack".to_string(),
                    "Array".to_string(),
                    "Linked List".to_string(),
                ],
                "Stack".to_string(),
                "Stack follows Last In, First Out (LIFO) principle".to_string(),
            ),
        ]),
        _ => None,
    }
}
