use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Provider identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Google,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "openai")]
    OpenAI,
    Anthropic,
    Custom,
}

impl ProviderId {
    pub const ALL: [ProviderId; 5] = [
        ProviderId::Google,
        ProviderId::OpenRouter,
        ProviderId::OpenAI,
        ProviderId::Anthropic,
        ProviderId::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderId::Google => "google",
            ProviderId::OpenRouter => "openrouter",
            ProviderId::OpenAI => "openai",
            ProviderId::Anthropic => "anthropic",
            ProviderId::Custom => "custom",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| {
                ApiError::UnknownProvider(format!(
                    "{}. Must be one of google, openrouter, openai, anthropic, custom",
                    s
                ))
            })
    }
}

/// A model offered by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDefinition {
    /// API-specific model id.
    pub id: &'static str,
    pub display_name: &'static str,
}

/// Static provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderConfig {
    pub id: ProviderId,
    pub label: &'static str,
    /// Human name of the credential, e.g. "Google AI API Key".
    pub api_key_field_label: &'static str,
    pub api_key_placeholder: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_help_link: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model_id: Option<&'static str>,
    pub models: Vec<ModelDefinition>,
}

impl ProviderConfig {
    pub fn has_model(&self, model_id: &str) -> bool {
        self.models.iter().any(|m| m.id == model_id)
    }

    pub fn model(&self, model_id: &str) -> Option<&ModelDefinition> {
        self.models.iter().find(|m| m.id == model_id)
    }

    /// Declared default, else first model, else empty.
    ///
    /// The declared default is returned even when it is missing from `models`.
    pub fn default_model_id(&self) -> String {
        self.default_model_id
            .or_else(|| self.models.first().map(|m| m.id))
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(default_model_id: Option<&'static str>, models: &[&'static str]) -> ProviderConfig {
        ProviderConfig {
            id: ProviderId::Custom,
            label: "Custom",
            api_key_field_label: "Custom API Key",
            api_key_placeholder: "key",
            api_key_help_link: None,
            default_model_id,
            models: models
                .iter()
                .copied()
                .map(|id| ModelDefinition {
                    id,
                    display_name: id,
                })
                .collect(),
        }
    }

    #[test]
    fn default_model_prefers_declared_default() {
        assert_eq!(provider(Some("b"), &["a", "b"]).default_model_id(), "b");
    }

    #[test]
    fn default_model_falls_back_to_first_then_empty() {
        assert_eq!(provider(None, &["a", "b"]).default_model_id(), "a");
        assert_eq!(provider(None, &[]).default_model_id(), "");
    }

    #[test]
    fn declared_default_outside_model_list_is_kept_literally() {
        assert_eq!(provider(Some("ghost"), &["a"]).default_model_id(), "ghost");
    }

    #[test]
    fn provider_id_round_trips_through_strings() {
        for id in ProviderId::ALL {
            assert_eq!(id.as_str().parse::<ProviderId>().unwrap(), id);
        }
        assert!("mistral".parse::<ProviderId>().is_err());
        assert_eq!(
            serde_json::to_string(&ProviderId::OpenRouter).unwrap(),
            "\"openrouter\""
        );
    }
}
