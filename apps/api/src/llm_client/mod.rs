/// LLM Client: the single point of entry for all OpenAI API calls.
///
/// ARCHITECTURAL RULE: No other module may call the text-generation or speech
/// endpoints directly. Services depend on the `TextGenerator` and
/// `SpeechSynthesizer` traits so tests can substitute doubles.
///
/// Models are hardcoded here to prevent drift between services.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;
pub mod speech;

/// Model used for question generation (structured output).
pub const QUESTION_MODEL: &str = "gpt-4o";
/// Model used for the tutoring script (prose output).
pub const SCRIPT_MODEL: &str = "gpt-4o-mini";

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

/// Whether the endpoint must answer with a single JSON object or free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    JsonObject,
    Text,
}

/// One chat completion: a system persona plus a single user prompt.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub system: &'a str,
    pub prompt: &'a str,
    pub temperature: f32,
    pub mode: OutputMode,
}

/// Text-generation seam. `LlmClient` is the production implementation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the text of the first choice. Empty content is an error.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError>;
}

/// Completes in JSON mode and deserializes the payload.
pub async fn complete_json<T: DeserializeOwned>(
    generator: &dyn TextGenerator,
    request: CompletionRequest<'_>,
) -> Result<T, LlmError> {
    let request = CompletionRequest {
        mode: OutputMode::JsonObject,
        ..request
    };
    let text = generator.complete(request).await?;

    // Strip markdown code fences if the model wraps JSON in them
    let text = strip_json_fences(&text);

    serde_json::from_str(text).map_err(LlmError::Parse)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for an OpenAI-compatible API. No retries: every failure is
/// returned once and the calling service decides how to degrade.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Sends an authenticated JSON POST and maps non-2xx statuses to `LlmError::Api`.
    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, LlmError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        Err(LlmError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt,
                },
            ],
            temperature: request.temperature,
            response_format: match request.mode {
                OutputMode::JsonObject => Some(ResponseFormat {
                    format_type: "json_object",
                }),
                OutputMode::Text => None,
            },
        };

        let response: ChatResponse = self.post("chat/completions", &body).await?.json().await?;

        if let Some(usage) = &response.usage {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                request.model, usage.prompt_tokens, usage.completion_tokens
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

/// Strips a ```json ... ``` or ``` ... ``` wrapper from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner).trim_start();
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
