/// LLM Client — the single point of entry for all chat-completion calls in Nebula.
///
/// ARCHITECTURAL RULE: No other module may call the provider API directly.
/// Generation services depend on the `RemoteGenerator` trait, which this
/// client implements.
///
/// Model: gpt-3.5-turbo (hardcoded — do not make configurable to prevent drift)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// The model used for all LLM calls in Nebula.
pub const MODEL: &str = "gpt-3.5-turbo";
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the text of the first choice, if it has any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Produces raw model text for a system instruction plus user prompt.
///
/// Carried by the generation services as `Arc<dyn RemoteGenerator>` so tests
/// can swap in canned or failing generators.
#[async_trait]
pub trait RemoteGenerator: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError>;
}

/// The single LLM client used by all services in Nebula.
/// One request per call: failures are reported, never retried.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            api_url,
        })
    }

    /// Makes a raw chat-completion call, returning the full response object.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let chat_response: ChatResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl RemoteGenerator for LlmClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        response
            .text()
            .map(str::to_owned)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start()),
        None => text,
    }
}
