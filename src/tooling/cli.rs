//! CLI Tooling
//!
//! Command-line interface for agent management, provider settings, prompt
//! composition, and generation. Every command runs against one [`Session`].

use crate::agent::{change_provider, compose, validate_agent, Agent, DeleteOutcome, SavedAgent};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::format::FormatId;
use crate::provider::{GenerationDispatcher, ProviderCatalog, ProviderId};
use crate::session::{Session, SubmitOutcome};
use crate::settings::mask_api_key;
use crate::store::{KeyValueStore, SledKeyValueStore};
use crate::tooling::format::{
    format_agent_list_json, format_agent_list_text, format_agent_show_text,
    format_format_list_text, format_format_show_text, format_key_status_text,
    format_provider_list_text, format_provider_models_text, to_pretty_json,
};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

/// agentprompt - reusable prompt agents with structured output formats
#[derive(Parser)]
#[command(name = "agentprompt")]
#[command(about = "Manage prompt agents and generate structured output through LLM providers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Settings store directory (overrides storage.store_path)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold logging flags into the loaded config.
    pub fn apply_logging_overrides(&self, config: &mut AppConfig) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage agents
    Agent {
        #[command(subcommand)]
        command: AgentCommands,
    },
    /// Inspect providers and choose the settings provider
    Provider {
        #[command(subcommand)]
        command: ProviderCommands,
    },
    /// Manage provider API keys
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
    /// Inspect output format templates
    Format {
        #[command(subcommand)]
        command: FormatCommands,
    },
    /// Print the composed system instruction for an agent
    Compose {
        /// Agent ID (default: active agent)
        #[arg(long)]
        agent: Option<String>,
    },
    /// Generate output for the given input with the active agent
    Generate {
        /// Input content (read from stdin when omitted)
        input: Option<String>,
        /// Select this agent before generating
        #[arg(long)]
        agent: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AgentCommands {
    /// List all agents
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show agent details
    Show {
        /// Agent ID (default: active agent)
        agent_id: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Create a new agent and select it
    Create {
        #[command(flatten)]
        fields: AgentFields,
    },
    /// Edit an existing agent
    Edit {
        /// Agent ID
        agent_id: String,
        #[command(flatten)]
        fields: AgentFields,
    },
    /// Delete an agent
    Delete {
        /// Agent ID
        agent_id: String,
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Make an agent the active one
    Select {
        /// Agent ID
        agent_id: String,
    },
}

/// Agent form fields. Unset fields keep their current (or default) values.
#[derive(Args, Debug, Default, Clone)]
pub struct AgentFields {
    /// Agent name
    #[arg(long)]
    pub name: Option<String>,
    /// Short description
    #[arg(long)]
    pub description: Option<String>,
    /// Hint shown for the input
    #[arg(long)]
    pub placeholder: Option<String>,
    /// Output format id (see `format list`)
    #[arg(long = "output-format")]
    pub output_format: Option<String>,
    /// Custom instructions
    #[arg(long, conflicts_with = "instructions_file")]
    pub instructions: Option<String>,
    /// Read custom instructions from a file
    #[arg(long)]
    pub instructions_file: Option<PathBuf>,
    /// Provider id
    #[arg(long)]
    pub provider: Option<String>,
    /// Model id
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Subcommand)]
pub enum ProviderCommands {
    /// List all providers
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List a provider's models
    Models {
        /// Provider ID (default: settings provider)
        provider_id: Option<String>,
    },
    /// Choose the provider shown in settings
    Use {
        /// Provider ID
        provider_id: String,
    },
}

#[derive(Subcommand)]
pub enum KeyCommands {
    /// Store an API key
    Set {
        /// Provider ID (default: settings provider)
        #[arg(long)]
        provider: Option<String>,
        /// The secret
        key: String,
    },
    /// Remove an API key
    Clear {
        /// Provider ID (default: settings provider)
        #[arg(long)]
        provider: Option<String>,
    },
    /// Show which providers have keys
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum FormatCommands {
    /// List output formats
    List,
    /// Print a format's template
    Show {
        /// Format ID
        format_id: String,
    },
}

/// CLI context wrapping the session
pub struct CliContext {
    session: Session,
}

impl CliContext {
    /// Open the sled store and HTTP transports described by `config`.
    pub fn new(config: &AppConfig, store_override: Option<PathBuf>) -> Result<Self, ApiError> {
        let store_path = match store_override {
            Some(path) => path,
            None => config.storage.resolve_store_path()?,
        };
        tracing::debug!(store = %store_path.display(), "Opening settings store");
        let store: Arc<dyn KeyValueStore> = Arc::new(SledKeyValueStore::open(&store_path)?);
        let dispatcher =
            GenerationDispatcher::from_endpoints(ProviderCatalog::builtin(), &config.providers);
        Ok(Self::with_session(Session::open(store, dispatcher)?))
    }

    pub fn with_session(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Execute a CLI command
    pub fn execute(&mut self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Agent { command } => self.handle_agent_command(command),
            Commands::Provider { command } => self.handle_provider_command(command),
            Commands::Key { command } => self.handle_key_command(command),
            Commands::Format { command } => handle_format_command(command),
            Commands::Compose { agent } => self.handle_compose(agent.as_deref()),
            Commands::Generate { input, agent } => {
                let input = match input {
                    Some(input) => input.clone(),
                    None => read_stdin()?,
                };
                self.handle_generate(input, agent.as_deref())
            }
        }
    }

    fn handle_agent_command(&mut self, command: &AgentCommands) -> Result<String, ApiError> {
        match command {
            AgentCommands::List { format } => self.handle_agent_list(format),
            AgentCommands::Show { agent_id, format } => {
                self.handle_agent_show(agent_id.as_deref(), format)
            }
            AgentCommands::Create { fields } => self.handle_agent_create(fields),
            AgentCommands::Edit { agent_id, fields } => self.handle_agent_edit(agent_id, fields),
            AgentCommands::Delete { agent_id, yes } => self.handle_agent_delete(agent_id, *yes),
            AgentCommands::Select { agent_id } => {
                self.session.select_agent(agent_id)?;
                let agent = self.session.registry().get_or_error(agent_id)?;
                Ok(format!("Selected agent: {} ({})", agent.name, agent.id))
            }
        }
    }

    fn handle_agent_list(&self, format: &str) -> Result<String, ApiError> {
        let registry = self.session.registry();
        match format {
            "json" => format_agent_list_json(registry.agents(), registry.active_agent_id()),
            _ => Ok(format_agent_list_text(
                registry.agents(),
                registry.active_agent_id(),
            )),
        }
    }

    fn handle_agent_show(&self, agent_id: Option<&str>, format: &str) -> Result<String, ApiError> {
        let agent = self.resolve_agent(agent_id)?;
        match format {
            "json" => to_pretty_json(agent),
            _ => Ok(format_agent_show_text(
                agent,
                self.session.catalog(),
                self.session.registry().active_agent_id() == Some(agent.id.as_str()),
            )),
        }
    }

    fn handle_agent_create(&mut self, fields: &AgentFields) -> Result<String, ApiError> {
        if fields.name.is_none() {
            return Err(ApiError::InvalidAgent("Agent Name is required.".to_string()));
        }
        let mut agent = Agent::default();
        apply_fields(&mut agent, fields, self.session.catalog())?;
        validate_agent(&agent, self.session.catalog()).map_err(ApiError::InvalidAgent)?;

        let saved = self.session.registry_mut().save(agent)?;
        self.session.select_agent(saved.id())?;
        Ok(format!("Agent created and selected: {}", saved.id()))
    }

    fn handle_agent_edit(&mut self, agent_id: &str, fields: &AgentFields) -> Result<String, ApiError> {
        let mut agent = self.session.registry().get_or_error(agent_id)?.clone();
        apply_fields(&mut agent, fields, self.session.catalog())?;
        validate_agent(&agent, self.session.catalog()).map_err(ApiError::InvalidAgent)?;

        match self.session.registry_mut().save(agent)? {
            SavedAgent::Updated(id) => Ok(format!("Agent updated: {}", id)),
            SavedAgent::Created(id) => Ok(format!("Agent created: {}", id)),
        }
    }

    fn handle_agent_delete(&mut self, agent_id: &str, yes: bool) -> Result<String, ApiError> {
        let mut prompt_error = None;
        let outcome = self.session.registry_mut().delete(agent_id, |agent| {
            if yes {
                return true;
            }
            match dialoguer::Confirm::new()
                .with_prompt(format!(
                    "Are you sure you want to delete the agent \"{}\"?",
                    agent.name
                ))
                .default(false)
                .interact()
            {
                Ok(confirmed) => confirmed,
                Err(e) => {
                    prompt_error = Some(e);
                    false
                }
            }
        })?;

        if let Some(e) = prompt_error {
            return Err(ApiError::ConfigError(format!("Failed to get user input: {}", e)));
        }
        match outcome {
            DeleteOutcome::Deleted => Ok(format!("Deleted agent: {}", agent_id)),
            DeleteOutcome::Cancelled => Ok("Deletion cancelled".to_string()),
        }
    }

    fn handle_provider_command(&mut self, command: &ProviderCommands) -> Result<String, ApiError> {
        let catalog = self.session.catalog().clone();
        match command {
            ProviderCommands::List { format } => {
                let status = self.session.settings().api_key_status(&catalog);
                match format.as_str() {
                    "json" => to_pretty_json(catalog.providers()),
                    _ => Ok(format_provider_list_text(
                        &catalog,
                        self.session.settings().active_provider(),
                        &status,
                    )),
                }
            }
            ProviderCommands::Models { provider_id } => {
                let id = self.provider_or_active(provider_id.as_deref())?;
                Ok(format_provider_models_text(catalog.resolve(id)))
            }
            ProviderCommands::Use { provider_id } => {
                let id = parse_provider(provider_id, &catalog)?;
                self.session.settings_mut().set_active_provider(id)?;
                Ok(format!("Active provider: {}", catalog.resolve(id).label))
            }
        }
    }

    fn handle_key_command(&mut self, command: &KeyCommands) -> Result<String, ApiError> {
        let catalog = self.session.catalog().clone();
        match command {
            KeyCommands::Set { provider, key } => {
                let id = self.provider_or_active(provider.as_deref())?;
                self.session.settings_mut().set_api_key(id, key)?;
                Ok(format!("Saved {}", catalog.resolve(id).api_key_field_label))
            }
            KeyCommands::Clear { provider } => {
                let id = self.provider_or_active(provider.as_deref())?;
                self.session.settings_mut().clear_api_key(id)?;
                Ok(format!("Cleared {}", catalog.resolve(id).api_key_field_label))
            }
            KeyCommands::Status { format } => {
                let status = self.session.settings().api_key_status(&catalog);
                match format.as_str() {
                    "json" => {
                        let map: serde_json::Map<String, serde_json::Value> = status
                            .iter()
                            .map(|(id, set)| (id.to_string(), serde_json::Value::Bool(*set)))
                            .collect();
                        to_pretty_json(&map)
                    }
                    _ => {
                        let settings = self.session.settings();
                        let masked: Vec<(ProviderId, Option<String>)> = status
                            .iter()
                            .map(|(id, _)| (*id, settings.api_key(*id).map(mask_api_key)))
                            .collect();
                        Ok(format_key_status_text(&catalog, &masked))
                    }
                }
            }
        }
    }

    fn handle_compose(&self, agent_id: Option<&str>) -> Result<String, ApiError> {
        match agent_id {
            Some(id) => Ok(compose(self.session.registry().get_or_error(id)?)),
            None => self
                .session
                .compose_active()
                .ok_or_else(|| ApiError::SubmitFailed("Please select or create an agent first.".to_string())),
        }
    }

    fn handle_generate(&mut self, input: String, agent_id: Option<&str>) -> Result<String, ApiError> {
        if let Some(agent_id) = agent_id {
            if self.session.registry().active_agent_id() != Some(agent_id) {
                self.session.select_agent(agent_id)?;
            }
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to start async runtime: {}", e)))?;

        match runtime.block_on(self.session.submit(input)) {
            SubmitOutcome::Generated(text) => Ok(text),
            SubmitOutcome::Failed { message, .. } | SubmitOutcome::Rejected(message) => {
                Err(ApiError::SubmitFailed(message))
            }
        }
    }

    fn resolve_agent(&self, agent_id: Option<&str>) -> Result<&Agent, ApiError> {
        let registry = self.session.registry();
        match agent_id {
            Some(id) => registry.get_or_error(id),
            None => registry
                .active()
                .ok_or_else(|| ApiError::SubmitFailed("Please select or create an agent first.".to_string())),
        }
    }

    fn provider_or_active(&self, raw: Option<&str>) -> Result<ProviderId, ApiError> {
        match raw {
            Some(raw) => parse_provider(raw, self.session.catalog()),
            None => Ok(self.session.settings().active_provider()),
        }
    }
}

fn handle_format_command(command: &FormatCommands) -> Result<String, ApiError> {
    match command {
        FormatCommands::List => Ok(format_format_list_text()),
        FormatCommands::Show { format_id } => {
            Ok(format_format_show_text(format_id.parse::<FormatId>()?))
        }
    }
}

fn parse_provider(raw: &str, catalog: &ProviderCatalog) -> Result<ProviderId, ApiError> {
    catalog
        .find_str(raw)
        .map(|provider| provider.id)
        .ok_or_else(|| ApiError::UnknownProvider(raw.to_string()))
}

/// Apply form fields to an agent. A provider change re-derives the model
/// unless a model is given explicitly.
fn apply_fields(agent: &mut Agent, fields: &AgentFields, catalog: &ProviderCatalog) -> Result<(), ApiError> {
    if let Some(name) = &fields.name {
        agent.name = name.trim().to_string();
    }
    if let Some(description) = &fields.description {
        agent.description = description.trim().to_string();
    }
    if let Some(placeholder) = &fields.placeholder {
        agent.input_placeholder = placeholder.trim().to_string();
    }
    if let Some(format) = &fields.output_format {
        agent.output_format = format.parse()?;
    }
    if let Some(instructions) = &fields.instructions {
        agent.custom_instructions = instructions.trim().to_string();
    }
    if let Some(path) = &fields.instructions_file {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to read instructions file {}: {}",
                path.display(),
                e
            ))
        })?;
        agent.custom_instructions = content.trim().to_string();
    }
    if let Some(provider) = &fields.provider {
        let id = parse_provider(provider, catalog)?;
        change_provider(agent, id.as_str(), catalog);
    }
    if let Some(model) = &fields.model {
        agent.model_id = model.trim().to_string();
        let provider = catalog.resolve_str(&agent.provider_id);
        if !catalog.contains_model(provider.id, &agent.model_id) {
            return Err(ApiError::InvalidAgent(format!(
                "Model {} is not offered by {}",
                agent.model_id, provider.label
            )));
        }
    }
    Ok(())
}

fn read_stdin() -> Result<String, ApiError> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| ApiError::ConfigError(format!("Failed to read input from stdin: {}", e)))?;
    Ok(input)
}
