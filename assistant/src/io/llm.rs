//! OpenAI-compatible chat completion client.
//!
//! The [`LlmClient`] trait decouples the agents from the HTTP backend; tests
//! use scripted clients that return canned replies. Delegation is best-effort
//! by design, so every failure mode here is recoverable by the callers'
//! deterministic fallbacks.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::io::config::LlmConfig;

const TEMPERATURE: f32 = 0.2;

/// Recognized LLM call failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("http error: {0}")]
    Http(String),
    #[error("llm returned status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    InvalidBody(String),
    #[error("llm returned an empty response")]
    EmptyResponse,
}

/// Abstraction over chat-completion backends.
pub trait LlmClient {
    /// Send a single-user-message prompt and return the reply text.
    fn chat(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Live client posting to an OpenAI-compatible `/chat/completions` endpoint.
pub struct HttpLlmClient {
    config: LlmConfig,
    client: reqwest::blocking::Client,
}

impl HttpLlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("build llm http client")?;
        Ok(Self {
            config: config.clone(),
            client,
        })
    }
}

impl LlmClient for HttpLlmClient {
    fn chat(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
        };
        debug!(model = %self.config.model, "sending chat completion request");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .map_err(|err| LlmError::Http(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Status(status.as_u16()));
        }
        let body: ChatResponse = response
            .json()
            .map_err(|err| LlmError::InvalidBody(err.to_string()))?;
        extract_content(body)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

fn extract_content(response: ChatResponse) -> Result<String, LlmError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .unwrap_or_default();
    if content.is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(content)
}
