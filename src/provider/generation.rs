//! Generation dispatcher: precondition checks, transport routing, and
//! response normalization.

use crate::config::ProviderEndpoints;
use crate::error::GenerationError;
use crate::format::FormatId;
use crate::provider::catalog::{ProviderCatalog, LOW_LATENCY_GOOGLE_MODEL};
use crate::provider::clients::{
    CompletionRequest, GeminiClient, GenerationTransport, OpenRouterClient,
};
use crate::provider::ProviderId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// Sampling temperature for every supported transport.
pub const GENERATION_TEMPERATURE: f32 = 0.3;

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```(\w*json)?\s*\n?(.*?)\n?\s*```$").expect("fence pattern is valid")
});

/// A fully composed generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub provider_id: ProviderId,
    pub api_key: String,
    pub model_id: String,
    pub user_input: String,
    pub system_instruction: String,
    pub output_format: FormatId,
}

/// Routes requests to the primary or aggregator transport.
///
/// Holds no mutable state; callers gate re-submission while a call is in flight.
pub struct GenerationDispatcher {
    catalog: ProviderCatalog,
    primary: Arc<dyn GenerationTransport>,
    aggregator: Arc<dyn GenerationTransport>,
}

impl GenerationDispatcher {
    pub fn new(
        catalog: ProviderCatalog,
        primary: Arc<dyn GenerationTransport>,
        aggregator: Arc<dyn GenerationTransport>,
    ) -> Self {
        Self {
            catalog,
            primary,
            aggregator,
        }
    }

    /// Dispatcher backed by the real HTTP transports.
    pub fn with_http_clients(catalog: ProviderCatalog) -> Self {
        Self::new(
            catalog,
            Arc::new(GeminiClient::new()),
            Arc::new(OpenRouterClient::new()),
        )
    }

    /// Dispatcher backed by HTTP transports at the configured endpoints.
    pub fn from_endpoints(catalog: ProviderCatalog, endpoints: &ProviderEndpoints) -> Self {
        Self::new(
            catalog,
            Arc::new(GeminiClient::with_base_url(endpoints.google_base_url.clone())),
            Arc::new(OpenRouterClient::with_endpoint(
                endpoints.openrouter_url.clone(),
                endpoints.app_title.clone(),
            )),
        )
    }

    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        if request.api_key.is_empty() {
            return Err(GenerationError::precondition(
                "API Key is missing. Please provide it in settings.",
            ));
        }

        let transport = match request.provider_id {
            ProviderId::Google => &self.primary,
            ProviderId::OpenRouter => &self.aggregator,
            other => {
                let label = self
                    .catalog
                    .find(other)
                    .map(|p| p.label)
                    .unwrap_or_else(|| other.as_str());
                return Err(GenerationError::precondition(format!(
                    "API Provider \"{}\" is not directly supported for generation in this version (unless routed via OpenRouter).",
                    label
                )));
            }
        };

        let completion = completion_request(request);
        tracing::info!(
            provider = %request.provider_id,
            model = %request.model_id,
            format = %request.output_format,
            "Dispatching generation request"
        );

        let raw = transport.complete(&completion).await.map_err(|err| {
            tracing::error!(
                provider = %request.provider_id,
                model = %request.model_id,
                error = %err,
                "Generation request failed"
            );
            err
        })?;

        let text = match raw {
            Some(text) if !text.is_empty() => text,
            _ => {
                tracing::warn!(provider = %request.provider_id, "Provider returned no text");
                return Err(GenerationError::empty_response(request.provider_id));
            }
        };

        Ok(normalize_output(&text, request.output_format))
    }
}

/// Transport options derived from the request.
fn completion_request(request: &GenerationRequest) -> CompletionRequest {
    let thinking_budget = (request.provider_id == ProviderId::Google
        && request.model_id == LOW_LATENCY_GOOGLE_MODEL)
        .then_some(0);
    CompletionRequest {
        api_key: request.api_key.clone(),
        model_id: request.model_id.clone(),
        user_input: request.user_input.clone(),
        system_instruction: request.system_instruction.clone(),
        temperature: GENERATION_TEMPERATURE,
        json_mode: request.output_format == FormatId::Json,
        thinking_budget,
    }
}

/// Normalize raw provider text for the requested format.
///
/// JSON output is unfenced and pretty-printed with 2-space indentation when it
/// parses; otherwise the unfenced text is returned as-is. Other formats pass
/// through untouched.
pub fn normalize_output(raw: &str, format: FormatId) -> String {
    if format != FormatId::Json {
        return raw.to_string();
    }

    let candidate = strip_json_fence(raw.trim());
    match serde_json::from_str::<serde_json::Value>(&candidate) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or(candidate),
        Err(e) => {
            tracing::warn!(error = %e, "Expected JSON output could not be parsed; returning it unchanged");
            candidate
        }
    }
}

/// Remove a surrounding markdown fence (optionally tagged `json`).
pub fn strip_json_fence(text: &str) -> String {
    match JSON_FENCE.captures(text).and_then(|caps| caps.get(2)) {
        Some(body) if !body.as_str().is_empty() => body.as_str().trim().to_string(),
        _ => text.to_string(),
    }
}
