//! Provider catalog: the static table of providers and their models.

use crate::error::ApiError;
use crate::provider::profile::{ModelDefinition, ProviderConfig, ProviderId};

/// Model id that runs with extended reasoning disabled.
pub const LOW_LATENCY_GOOGLE_MODEL: &str = "gemini-2.5-flash-preview-04-17";

const fn model(id: &'static str, display_name: &'static str) -> ModelDefinition {
    ModelDefinition { id, display_name }
}

fn builtin_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            id: ProviderId::Google,
            label: "Google AI (Gemini)",
            api_key_field_label: "Google AI API Key",
            api_key_placeholder: "Enter your AIzaSy... API key",
            api_key_help_link: Some("https://aistudio.google.com/app/apikey"),
            default_model_id: Some(LOW_LATENCY_GOOGLE_MODEL),
            models: vec![
                model(LOW_LATENCY_GOOGLE_MODEL, "Gemini 2.5 Flash Preview (04-17)"),
                model("gemini-2.5-pro-preview-05-06", "Gemini 2.5 Pro Preview (05-06)"),
            ],
        },
        ProviderConfig {
            id: ProviderId::OpenRouter,
            label: "OpenRouter (Multi-Provider)",
            api_key_field_label: "OpenRouter API Key",
            api_key_placeholder: "Enter your sk-or-... API key",
            api_key_help_link: Some("https://openrouter.ai/keys"),
            default_model_id: Some("mistralai/mistral-7b-instruct:free"),
            models: vec![
                model("mistralai/mistral-7b-instruct:free", "Mistral 7B Instruct (Free)"),
                model("nousresearch/nous-capybara-7b:free", "Nous Capybara 7B (Free)"),
                model("huggingfaceh4/zephyr-7b-beta:free", "Zephyr 7B Beta (Free)"),
                model("openchat/openchat-7b:free", "OpenChat 7B (Free)"),
                model("google/gemma-7b-it:free", "Google Gemma 7B (Free)"),
                model("openai/gpt-4o", "OpenAI GPT-4o"),
                model("openai/gpt-3.5-turbo", "OpenAI GPT-3.5 Turbo"),
                model("anthropic/claude-3.5-sonnet", "Anthropic Claude 3.5 Sonnet"),
                model("anthropic/claude-3-haiku", "Anthropic Claude 3 Haiku"),
                model("google/gemini-1.5-pro-latest", "Google Gemini 1.5 Pro"),
                model("google/gemini-1.5-flash-latest", "Google Gemini 1.5 Flash"),
                model("mistralai/mistral-large-latest", "Mistral Large"),
                model("mistralai/mixtral-8x7b-instruct", "Mixtral 8x7B Instruct"),
            ],
        },
        ProviderConfig {
            id: ProviderId::OpenAI,
            label: "OpenAI (GPT) - Placeholder",
            api_key_field_label: "OpenAI API Key",
            api_key_placeholder: "Enter your sk-... API key",
            api_key_help_link: Some("https://platform.openai.com/api-keys"),
            default_model_id: Some("gpt-4o"),
            models: vec![
                model("gpt-4o", "GPT-4o (Example)"),
                model("gpt-3.5-turbo", "GPT-3.5 Turbo (Example)"),
            ],
        },
        ProviderConfig {
            id: ProviderId::Anthropic,
            label: "Anthropic (Claude) - Placeholder",
            api_key_field_label: "Anthropic API Key",
            api_key_placeholder: "Enter your sk-ant-... API key",
            api_key_help_link: Some("https://console.anthropic.com/settings/keys"),
            default_model_id: Some("claude-3-opus-20240229"),
            models: vec![
                model("claude-3-5-sonnet-20240620", "Claude 3.5 Sonnet (Example)"),
                model("claude-3-opus-20240229", "Claude 3 Opus (Example)"),
                model("claude-3-haiku-20240307", "Claude 3 Haiku (Example)"),
            ],
        },
        ProviderConfig {
            id: ProviderId::Custom,
            label: "Custom Provider - Placeholder",
            api_key_field_label: "Custom API Key",
            api_key_placeholder: "Enter your API key",
            api_key_help_link: None,
            default_model_id: Some("custom-model"),
            models: vec![model("custom-model", "Custom Model (Example)")],
        },
    ]
}

/// Immutable, ordered provider table.
///
/// The first registered provider is the fallback for unknown ids.
#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    providers: Vec<ProviderConfig>,
}

impl ProviderCatalog {
    /// The catalog shipped with the application.
    pub fn builtin() -> Self {
        Self {
            providers: builtin_providers(),
        }
    }

    /// Build a catalog from an explicit provider list.
    pub fn new(providers: Vec<ProviderConfig>) -> Result<Self, ApiError> {
        if providers.is_empty() {
            return Err(ApiError::ConfigError(
                "Provider catalog requires at least one provider".to_string(),
            ));
        }
        Ok(Self { providers })
    }

    pub fn providers(&self) -> &[ProviderConfig] {
        &self.providers
    }

    pub fn default_provider(&self) -> &ProviderConfig {
        &self.providers[0]
    }

    pub fn find(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.id == id)
    }

    /// Look up a raw provider id as stored on disk.
    pub fn find_str(&self, raw: &str) -> Option<&ProviderConfig> {
        raw.parse::<ProviderId>().ok().and_then(|id| self.find(id))
    }

    /// Resolve a provider, falling back to the first registered provider.
    pub fn resolve(&self, id: ProviderId) -> &ProviderConfig {
        self.find(id).unwrap_or_else(|| self.default_provider())
    }

    /// Resolve a raw provider id, falling back to the first registered provider.
    pub fn resolve_str(&self, raw: &str) -> &ProviderConfig {
        self.find_str(raw)
            .unwrap_or_else(|| self.default_provider())
    }

    /// Default model of the resolved provider; empty means no model available.
    pub fn default_model(&self, id: ProviderId) -> String {
        self.resolve(id).default_model_id()
    }

    pub fn contains_model(&self, id: ProviderId, model_id: &str) -> bool {
        self.find(id).map(|p| p.has_model(model_id)).unwrap_or(false)
    }
}

impl Default for ProviderCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
