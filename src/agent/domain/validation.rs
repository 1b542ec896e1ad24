//! Agent form validation owned by the agent domain.

use super::config::Agent;
use crate::provider::ProviderCatalog;

pub const MAX_NAME_CHARS: usize = 70;
pub const MAX_DESCRIPTION_CHARS: usize = 200;
pub const MAX_PLACEHOLDER_CHARS: usize = 150;

/// Validate an agent submitted from the create/edit form.
pub fn validate_agent(agent: &Agent, catalog: &ProviderCatalog) -> Result<(), String> {
    if agent.name.trim().is_empty() {
        return Err("Agent Name is required.".to_string());
    }
    if agent.name.chars().count() > MAX_NAME_CHARS {
        return Err(format!(
            "Agent Name must be at most {} characters.",
            MAX_NAME_CHARS
        ));
    }

    if agent.description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(format!(
            "Description must be at most {} characters.",
            MAX_DESCRIPTION_CHARS
        ));
    }

    if agent.input_placeholder.chars().count() > MAX_PLACEHOLDER_CHARS {
        return Err(format!(
            "Input placeholder must be at most {} characters.",
            MAX_PLACEHOLDER_CHARS
        ));
    }

    if agent.custom_instructions.trim().is_empty() {
        return Err("Custom Instructions are required.".to_string());
    }

    if agent.provider_id.trim().is_empty() {
        return Err("API Provider selection is required.".to_string());
    }
    let Some(provider) = catalog.find_str(&agent.provider_id) else {
        return Err(format!("Unknown API Provider: {}", agent.provider_id));
    };

    if agent.model_id.is_empty() && !provider.models.is_empty() {
        return Err("Model selection is required.".to_string());
    }

    Ok(())
}
