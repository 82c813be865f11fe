//! Tests for the rate limit configuration system.

use quizforge_rate_limit::{QuizforgeConfig, recommended_model};

#[test]
fn test_load_bundled_defaults() {
    let config = QuizforgeConfig::load().unwrap();

    // Bundled defaults carry the Groq model catalog
    assert!(config.models.contains_key("llama-3.1-8b-instant"));
    assert!(config.models.contains_key("llama-3.1-70b-versatile"));
    assert!(config.models.contains_key("mixtral-8x7b-32768"));

    let instant = &config.models["llama-3.1-8b-instant"];
    assert_eq!(instant.tokens_per_minute, 6_000);
    assert_eq!(instant.requests_per_minute, 30);

    // Default margins and retry parameters
    assert_eq!(config.margins.tokens, 0.8);
    assert_eq!(config.margins.requests, 0.9);
    assert_eq!(config.retry.max_retries, 3);
}

#[test]
fn test_profile_applies_margins() {
    let config = QuizforgeConfig::load().unwrap();

    let profile = config.profile_for("llama-3.1-8b-instant").unwrap();
    assert_eq!(profile.safe_token_limit(), 4_800); // 6000 * 0.8
    assert_eq!(profile.safe_request_limit(), 27); // 30 * 0.9

    let versatile = config.profile_for("llama-3.1-70b-versatile").unwrap();
    assert_eq!(versatile.safe_token_limit(), 9_600); // 12000 * 0.8
}

#[test]
fn test_profile_for_unknown_model_is_none() {
    let config = QuizforgeConfig::load().unwrap();
    assert!(config.profile_for("no-such-model").is_none());
}

#[test]
fn test_recommended_model_is_in_catalog() {
    let config = QuizforgeConfig::load().unwrap();
    assert!(config.models.contains_key(recommended_model()));
}

#[test]
fn test_retry_policy_from_config() {
    let config = QuizforgeConfig::load().unwrap();
    let policy = config.retry_policy();
    assert_eq!(*policy.max_retries(), 3);
    assert_eq!(*policy.base_delay(), std::time::Duration::from_secs(1));
    assert_eq!(*policy.max_delay(), std::time::Duration::from_secs(60));
}

#[test]
fn test_config_from_file() {
    use std::io::Write;
    use tempfile::Builder;

    // Create a temporary config file with .toml extension
    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        temp_file,
        r#"
[models."test-model"]
tokens_per_minute = 42_000
requests_per_minute = 7

[margins]
tokens = 0.5
requests = 0.5
"#
    )
    .unwrap();

    let config = QuizforgeConfig::from_file(temp_file.path()).unwrap();

    assert!(config.models.contains_key("test-model"));
    let profile = config.profile_for("test-model").unwrap();
    assert_eq!(profile.safe_token_limit(), 21_000);
    assert_eq!(profile.safe_request_limit(), 3);

    // Sections absent from the file fall back to defaults
    assert_eq!(config.retry.max_retries, 3);
    assert_eq!(config.spacing.min_secs, 0.5);
}
