//! Groq chat completions client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::driver::CompletionDriver;
use quizforge_error::{ProviderError, ProviderErrorKind, QuizforgeResult};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Groq LPU Inference API client (OpenAI-compatible chat completions).
///
/// # Example
///
/// ```no_run
/// use quizforge_models::GroqClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GroqClient::new("llama-3.1-8b-instant")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqClient {
    /// Creates a new Groq client for the given model.
    ///
    /// Reads the API token from the `GROQ_API_KEY` environment variable,
    /// loading a `.env` file first if one is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the API token is not set.
    #[instrument(skip_all, fields(model = %model.as_ref()))]
    pub fn new(model: impl AsRef<str>) -> QuizforgeResult<Self> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| ProviderError::new(ProviderErrorKind::MissingApiKey))?;
        Ok(Self::with_api_key(api_key, model.as_ref()))
    }

    /// Creates a new Groq client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        debug!("Creating new Groq client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: GROQ_API_URL.to_string(),
        }
    }

    /// Overrides the endpoint URL. Used to point at a local test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sends a single-turn chat completion request.
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn chat(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        };

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Groq API");
                Self::classify_transport_error(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Groq API returned error");
            return Err(ProviderError::new(ProviderErrorKind::HttpError {
                status_code: status.as_u16(),
                message: body,
            }));
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Groq response");
            ProviderError::new(ProviderErrorKind::ApiRequest(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ProviderError::new(ProviderErrorKind::EmptyResponse))?;

        debug!(content_len = content.len(), "Received completion from Groq");
        Ok(content)
    }

    /// Classify a transport-level error, recovering a status code when the
    /// message carries one.
    ///
    /// Some middleware surfaces HTTP failures as opaque strings like
    /// "bad response from server; code 503; ...". Extracting the code keeps
    /// the retry classification structural instead of phrase-only.
    fn classify_transport_error(err: impl std::fmt::Display) -> ProviderError {
        let message = err.to_string();
        match extract_status_code(&message) {
            Some(status_code) => ProviderError::new(ProviderErrorKind::HttpError {
                status_code,
                message,
            }),
            None => ProviderError::new(ProviderErrorKind::ApiRequest(message)),
        }
    }
}

/// Extract an HTTP status code from an error message string.
///
/// Parses strings like "bad response from server; code 503; description: ..."
/// and extracts the numeric status code.
fn extract_status_code(error_msg: &str) -> Option<u16> {
    let code_start = error_msg.find("code ")?;
    let code_str = &error_msg[code_start + 5..];
    let end = code_str
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(code_str.len());
    code_str[..end].parse().ok()
}

#[async_trait]
impl CompletionDriver for GroqClient {
    #[instrument(skip(self, prompt), fields(provider = "groq", model = %self.model))]
    async fn complete(&self, prompt: &str) -> QuizforgeResult<String> {
        self.chat(prompt).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "groq"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
