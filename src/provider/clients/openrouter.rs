//! OpenRouter transport: OpenAI-style chat completions over a fixed endpoint.

use crate::error::GenerationError;
use crate::provider::clients::{CompletionRequest, GenerationTransport};
use crate::provider::ProviderId;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

pub const OPENROUTER_CHAT_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_APP_TITLE: &str = "AI Prompt Agent";

pub struct OpenRouterClient {
    client: Client,
    endpoint: String,
    app_title: String,
}

impl OpenRouterClient {
    pub fn new() -> Self {
        Self::with_endpoint(OPENROUTER_CHAT_URL, DEFAULT_APP_TITLE)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, app_title: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            app_title: app_title.into(),
        }
    }

    fn build_request(request: &CompletionRequest) -> ChatRequest {
        ChatRequest {
            model: request.model_id.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_instruction.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_input.clone(),
                },
            ],
            temperature: request.temperature,
        }
    }

    /// Nested `error.message` when present, else the HTTP status line.
    fn error_from_body(status: StatusCode, body: &str) -> GenerationError {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error)
            .and_then(|error| error.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| {
                format!(
                    "OpenRouter API Error: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default()
                )
            });
        GenerationError::transport(ProviderId::OpenRouter, message).with_status(status.as_u16())
    }

    fn response_text(response: ChatResponse) -> Option<String> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
    }
}

impl Default for OpenRouterClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationTransport for OpenRouterClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<Option<String>, GenerationError> {
        let body = Self::build_request(request);
        tracing::debug!(model = %request.model_id, "Sending OpenRouter chat completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&request.api_key)
            .header("X-Title", &self.app_title)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::transport(ProviderId::OpenRouter, e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::transport(ProviderId::OpenRouter, e.to_string()))?;

        if !status.is_success() {
            return Err(Self::error_from_body(status, &text));
        }

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            GenerationError::transport(
                ProviderId::OpenRouter,
                format!("Failed to parse OpenRouter response: {}", e),
            )
        })?;
        Ok(Self::response_text(parsed))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}
