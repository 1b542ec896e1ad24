//! Session controller: the one place that turns agent, settings, and
//! dispatcher results into user-visible text.

use crate::agent::{compose, AgentRegistry, KvAgentStorage};
use crate::error::{ApiError, GenerationError};
use crate::provider::classify;
use crate::provider::{GenerationDispatcher, GenerationRequest, ProviderCatalog};
use crate::settings::ProviderSettings;
use crate::store::KeyValueStore;
use std::sync::Arc;

/// Output shown while a request is outstanding.
pub const GENERATING_PLACEHOLDER: &str = "Generating...";

/// Result of [`Session::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Normalized model output.
    Generated(String),
    /// The request was dispatched and failed; `message` is the rendered text.
    Failed {
        message: String,
        error: GenerationError,
    },
    /// A local precondition failed; nothing was dispatched.
    Rejected(String),
}

impl SubmitOutcome {
    /// Text for the output area.
    pub fn text(&self) -> &str {
        match self {
            SubmitOutcome::Generated(text) => text,
            SubmitOutcome::Failed { message, .. } => message,
            SubmitOutcome::Rejected(message) => message,
        }
    }
}

pub struct Session {
    registry: AgentRegistry,
    settings: ProviderSettings,
    dispatcher: GenerationDispatcher,
    user_input: String,
    output: String,
    request_in_flight: bool,
}

impl Session {
    /// Load settings and agents from `store`.
    pub fn open(
        store: Arc<dyn KeyValueStore>,
        dispatcher: GenerationDispatcher,
    ) -> Result<Self, ApiError> {
        let catalog = dispatcher.catalog().clone();
        let settings = ProviderSettings::load(store.clone(), &catalog)?;
        let registry = AgentRegistry::load(Arc::new(KvAgentStorage::new(store)), catalog)?;
        Ok(Self {
            registry,
            settings,
            dispatcher,
            user_input: String::new(),
            output: String::new(),
            request_in_flight: false,
        })
    }

    pub fn catalog(&self) -> &ProviderCatalog {
        self.dispatcher.catalog()
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AgentRegistry {
        &mut self.registry
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ProviderSettings {
        &mut self.settings
    }

    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    pub fn set_user_input(&mut self, input: impl Into<String>) {
        self.user_input = input.into();
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn is_request_in_flight(&self) -> bool {
        self.request_in_flight
    }

    /// Select an agent and reset the input and output areas.
    pub fn select_agent(&mut self, agent_id: &str) -> Result<(), ApiError> {
        self.registry.select(agent_id)?;
        self.user_input.clear();
        self.output.clear();
        Ok(())
    }

    /// Composed system instruction for the active agent.
    pub fn compose_active(&self) -> Option<String> {
        self.registry.active().map(compose)
    }

    /// Set the input and run one generation for the active agent.
    pub async fn submit(&mut self, input: impl Into<String>) -> SubmitOutcome {
        self.user_input = input.into();

        let request = match self.prepare_request() {
            Ok(request) => request,
            Err(message) => {
                tracing::debug!(reason = %message, "Submission rejected");
                return SubmitOutcome::Rejected(message);
            }
        };

        self.request_in_flight = true;
        self.output = GENERATING_PLACEHOLDER.to_string();

        let outcome = match self.dispatcher.generate(&request).await {
            Ok(text) => SubmitOutcome::Generated(text),
            Err(error) => SubmitOutcome::Failed {
                message: classify::user_message(&error),
                error,
            },
        };

        self.output = outcome.text().to_string();
        self.request_in_flight = false;
        outcome
    }

    /// Run the local preconditions in order and build the request.
    fn prepare_request(&self) -> Result<GenerationRequest, String> {
        let agent = self
            .registry
            .active()
            .ok_or_else(|| "Please select or create an agent first.".to_string())?;

        let provider = self.catalog().resolve_str(&agent.provider_id);
        let api_key = self.settings.api_key(provider.id).ok_or_else(|| {
            format!(
                "Please set the {} for {} in settings.",
                provider.api_key_field_label, provider.label
            )
        })?;

        if agent.custom_instructions.is_empty() {
            return Err(
                "The selected agent has no custom instructions. Please edit the agent.".to_string(),
            );
        }

        if self.user_input.trim().is_empty() {
            return Err("Please enter some input content.".to_string());
        }

        if agent.model_id.is_empty() && !provider.models.is_empty() {
            return Err(format!(
                "The agent \"{}\" does not have a model selected. Please edit the agent and choose a model.",
                agent.name
            ));
        }

        Ok(GenerationRequest {
            provider_id: provider.id,
            api_key: api_key.to_string(),
            model_id: agent.model_id.clone(),
            user_input: self.user_input.clone(),
            system_instruction: compose(agent),
            output_format: agent.output_format,
        })
    }
}
