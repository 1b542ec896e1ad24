//! Google Gemini transport over the public `generateContent` REST endpoint.

use crate::error::GenerationError;
use crate::provider::clients::{CompletionRequest, GenerationTransport};
use crate::provider::ProviderId;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_GEMINI_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model_id: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, model_id
        )
    }

    fn build_request(request: &CompletionRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(request.user_input.clone()),
                    thought: None,
                }],
            }],
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: Some(request.system_instruction.clone()),
                    thought: None,
                }],
            },
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                response_mime_type: request
                    .json_mode
                    .then(|| "application/json".to_string()),
                thinking_config: request
                    .thinking_budget
                    .map(|thinking_budget| GeminiThinkingConfig { thinking_budget }),
            },
        }
    }

    /// Concatenated text of the first candidate, skipping thought parts.
    fn response_text(response: GeminiResponse) -> Option<String> {
        let candidate = response.candidates.into_iter().next()?;
        let parts = candidate.content?.parts;
        let texts: Vec<String> = parts
            .into_iter()
            .filter(|part| part.thought != Some(true))
            .filter_map(|part| part.text)
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    fn error_from_body(status: reqwest::StatusCode, body: &str) -> GenerationError {
        let message = match serde_json::from_str::<GeminiErrorEnvelope>(body) {
            Ok(GeminiErrorEnvelope {
                error:
                    GeminiErrorBody {
                        message: Some(message),
                        status: error_status,
                        ..
                    },
            }) => match error_status {
                Some(error_status) => format!("[{} {}] {}", status.as_u16(), error_status, message),
                None => format!("[{}] {}", status.as_u16(), message),
            },
            _ => format!(
                "Google AI API Error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            ),
        };
        GenerationError::transport(ProviderId::Google, message).with_status(status.as_u16())
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationTransport for GeminiClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<Option<String>, GenerationError> {
        let body = Self::build_request(request);
        tracing::debug!(model = %request.model_id, "Sending Gemini generateContent request");

        let response = self
            .client
            .post(self.endpoint(&request.model_id))
            .header("x-goog-api-key", &request.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::transport(ProviderId::Google, e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::transport(ProviderId::Google, e.to_string()))?;

        if !status.is_success() {
            return Err(Self::error_from_body(status, &text));
        }

        let parsed: GeminiResponse = serde_json::from_str(&text).map_err(|e| {
            GenerationError::transport(
                ProviderId::Google,
                format!("Failed to parse Gemini response: {}", e),
            )
        })?;
        Ok(Self::response_text(parsed))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    system_instruction: GeminiContent,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<GeminiThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    #[allow(dead_code)]
    code: Option<u16>,
    message: Option<String>,
    status: Option<String>,
}
