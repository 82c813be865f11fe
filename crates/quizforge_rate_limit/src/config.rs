//! Configuration structures for rate limiting.
//!
//! This module provides TOML-based configuration for rate limits. The
//! configuration system supports:
//! - Bundled defaults (include_str! from quizforge.toml)
//! - User overrides (./quizforge.toml or ~/.config/quizforge/quizforge.toml)
//! - Automatic merging with user values taking precedence

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use config::{Config, File, FileFormat};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{RateLimitError, RateLimitErrorKind};
use crate::profile::RateLimitProfile;
use crate::retry::RetryPolicy;
use quizforge_error::{ConfigError, QuizforgeError, QuizforgeResult};

/// Provider-stated limits for one model.
///
/// # Example
///
/// ```toml
/// [models."llama-3.1-8b-instant"]
/// tokens_per_minute = 6_000
/// requests_per_minute = 30
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelLimitConfig {
    /// Tokens per minute the provider allows for this model.
    pub tokens_per_minute: u64,

    /// Requests per minute the provider allows for this model.
    pub requests_per_minute: u32,

    /// Approximate cost per token in USD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_token: Option<f64>,

    /// Deployment class the model is suited for ("development", "production").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_for: Option<String>,
}

/// Safety margins applied below the provider-stated limits.
///
/// Defaults (0.8 tokens, 0.9 requests) are tuning knobs, not invariants;
/// deployments may override them per config file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct MarginConfig {
    /// Fraction of the token limit the budget may consume.
    #[serde(default = "default_token_margin")]
    pub tokens: f64,

    /// Fraction of the request limit the budget may consume.
    #[serde(default = "default_request_margin")]
    pub requests: f64,
}

fn default_token_margin() -> f64 {
    crate::profile::DEFAULT_TOKEN_SAFETY_MARGIN
}

fn default_request_margin() -> f64 {
    crate::profile::DEFAULT_REQUEST_SAFETY_MARGIN
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            tokens: default_token_margin(),
            requests: default_request_margin(),
        }
    }
}

/// Randomized spacing applied after every admitted call.
///
/// Spreads out callers admitted simultaneously so they do not hit the
/// provider in a synchronized burst.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SpacingConfig {
    /// Lower spacing bound, seconds.
    #[serde(default = "default_spacing_min")]
    pub min_secs: f64,

    /// Upper spacing bound, seconds.
    #[serde(default = "default_spacing_max")]
    pub max_secs: f64,
}

fn default_spacing_min() -> f64 {
    0.5
}

fn default_spacing_max() -> f64 {
    1.0
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            min_secs: default_spacing_min(),
            max_secs: default_spacing_max(),
        }
    }
}

impl SpacingConfig {
    /// Check that the bounds describe a valid range.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_secs` is negative or exceeds `max_secs`.
    pub fn validate(&self) -> Result<(), RateLimitError> {
        if self.min_secs < 0.0 || self.min_secs > self.max_secs {
            return Err(RateLimitError::new(RateLimitErrorKind::InvalidSpacing(
                format!(
                    "spacing bounds must satisfy 0 <= min <= max, got [{}, {}]",
                    self.min_secs, self.max_secs
                ),
            )));
        }
        Ok(())
    }

    /// Draw a spacing delay uniformly from the configured range.
    pub fn sample(&self) -> Duration {
        if self.min_secs >= self.max_secs {
            return Duration::from_secs_f64(self.min_secs.max(0.0));
        }
        let secs: f64 = rand::thread_rng().gen_range(self.min_secs..self.max_secs);
        Duration::from_secs_f64(secs)
    }
}

/// Backoff parameters for the retry controller.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Delay before the first retry, seconds.
    #[serde(default = "default_base_delay")]
    pub base_delay_secs: f64,

    /// Ceiling on any single backoff delay, seconds.
    #[serde(default = "default_max_delay")]
    pub max_delay_secs: f64,
}

fn default_max_retries() -> usize {
    3
}

fn default_base_delay() -> f64 {
    1.0
}

fn default_max_delay() -> f64 {
    60.0
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_secs: default_base_delay(),
            max_delay_secs: default_max_delay(),
        }
    }
}

impl RetryConfig {
    /// Build the policy the retry controller consumes.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            Duration::from_secs_f64(self.base_delay_secs),
            Duration::from_secs_f64(self.max_delay_secs),
        )
    }
}

/// Top-level Quizforge rate limit configuration.
///
/// Loads limits from TOML files with a precedence system:
/// 1. Bundled defaults (include_str! from quizforge.toml)
/// 2. User override (./quizforge.toml or ~/.config/quizforge/quizforge.toml)
///
/// # Example
///
/// ```no_run
/// use quizforge_rate_limit::QuizforgeConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = QuizforgeConfig::load()?;
/// let profile = config.profile_for("llama-3.1-8b-instant").unwrap();
/// println!("safe token limit: {}", profile.safe_token_limit());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct QuizforgeConfig {
    /// Map of model name to provider-stated limits.
    #[serde(default)]
    pub models: HashMap<String, ModelLimitConfig>,

    /// Safety margins applied to every model.
    #[serde(default)]
    pub margins: MarginConfig,

    /// Inter-request spacing bounds.
    #[serde(default)]
    pub spacing: SpacingConfig,

    /// Retry controller parameters.
    #[serde(default)]
    pub retry: RetryConfig,
}

impl QuizforgeConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> QuizforgeResult<Self> {
        debug!("Loading rate limit configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                QuizforgeError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                QuizforgeError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override
    /// earlier):
    /// 1. Bundled defaults (quizforge.toml shipped with the library)
    /// 2. User config in home directory (~/.config/quizforge/quizforge.toml)
    /// 3. User config in current directory (./quizforge.toml)
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> QuizforgeResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../quizforge.toml");

        let mut builder = Config::builder()
            // Start with bundled defaults
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // Add user config from home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/quizforge/quizforge.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // Add user config from current directory (optional, highest precedence)
        builder = builder.add_source(File::with_name("quizforge").required(false));

        builder
            .build()
            .map_err(|e| {
                QuizforgeError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                QuizforgeError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Build the rate limit profile for a model, margins applied.
    ///
    /// Returns `None` for models absent from the configuration.
    #[instrument(skip(self))]
    pub fn profile_for(&self, model: &str) -> Option<RateLimitProfile> {
        let limits = self.models.get(model)?;

        debug!(
            model,
            tpm = limits.tokens_per_minute,
            rpm = limits.requests_per_minute,
            "building rate limit profile"
        );

        RateLimitProfile::with_margins(
            model,
            limits.tokens_per_minute,
            limits.requests_per_minute,
            self.margins.tokens,
            self.margins.requests,
        )
        .ok()
    }

    /// Retry policy derived from the retry section.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.policy()
    }
}

/// Recommended default model for the current deployment.
///
/// Production deployments (`ENVIRONMENT=production`) get the larger model
/// for quality; everything else gets the instant model for iteration speed.
pub fn recommended_model() -> &'static str {
    if env::var("ENVIRONMENT").as_deref() == Ok("production") {
        "llama-3.1-70b-versatile"
    } else {
        "llama-3.1-8b-instant"
    }
}
