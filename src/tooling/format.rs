//! Format agents, providers, keys, and output formats as text or JSON.

use crate::agent::Agent;
use crate::error::ApiError;
use crate::format::{self, FormatId};
use crate::provider::{ProviderCatalog, ProviderConfig, ProviderId};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::StorageError(format!("Failed to encode output: {}", e)))
}

fn active_marker(active: bool) -> &'static str {
    if active {
        "*"
    } else {
        ""
    }
}

pub fn format_agent_list_text(agents: &[Agent], active_agent_id: Option<&str>) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["", "ID", "Name", "Format", "Provider", "Model"]);
    for agent in agents {
        table.add_row(vec![
            active_marker(Some(agent.id.as_str()) == active_agent_id).to_string(),
            agent.id.clone(),
            agent.name.clone(),
            agent.output_format.to_string(),
            agent.provider_id.clone(),
            agent.model_id.clone(),
        ]);
    }
    format!("{}\n\n{}\n", format_section_heading("Agents"), table)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AgentListOutput<'a> {
    active_agent_id: Option<&'a str>,
    agents: &'a [Agent],
}

pub fn format_agent_list_json(
    agents: &[Agent],
    active_agent_id: Option<&str>,
) -> Result<String, ApiError> {
    to_pretty_json(&AgentListOutput {
        active_agent_id,
        agents,
    })
}

pub fn format_agent_show_text(agent: &Agent, catalog: &ProviderCatalog, active: bool) -> String {
    let provider = catalog.resolve_str(&agent.provider_id);
    let model = provider
        .model(&agent.model_id)
        .map(|m| format!("{} ({})", m.display_name, m.id))
        .unwrap_or_else(|| agent.model_id.clone());

    let mut out = format!("{}\n\n", format_section_heading(&agent.name));
    out.push_str(&format!("  ID: {}\n", agent.id));
    if active {
        out.push_str("  Active: yes\n");
    }
    if !agent.description.is_empty() {
        out.push_str(&format!("  Description: {}\n", agent.description));
    }
    out.push_str(&format!(
        "  Output format: {} ({})\n",
        agent.output_format.label(),
        agent.output_format
    ));
    out.push_str(&format!("  Provider: {}\n", provider.label));
    out.push_str(&format!("  Model: {}\n", model));
    if !agent.input_placeholder.is_empty() {
        out.push_str(&format!("  Input placeholder: {}\n", agent.input_placeholder));
    }
    out.push_str(&format!(
        "\n{}\n\n{}\n",
        format_section_heading("Custom instructions"),
        agent.custom_instructions.trim_end()
    ));
    out
}

pub fn format_provider_list_text(
    catalog: &ProviderCatalog,
    active: ProviderId,
    key_status: &[(ProviderId, bool)],
) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["", "ID", "Label", "Models", "Default model", "API key"]);
    for provider in catalog.providers() {
        let has_key = key_status
            .iter()
            .any(|(id, set)| *id == provider.id && *set);
        table.add_row(vec![
            active_marker(provider.id == active).to_string(),
            provider.id.to_string(),
            provider.label.to_string(),
            provider.models.len().to_string(),
            provider.default_model_id(),
            if has_key { "set" } else { "missing" }.to_string(),
        ]);
    }
    format!("{}\n\n{}\n", format_section_heading("Providers"), table)
}

pub fn format_provider_models_text(provider: &ProviderConfig) -> String {
    let default_model = provider.default_model_id();
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["", "Model ID", "Name"]);
    for model in &provider.models {
        table.add_row(vec![
            active_marker(model.id == default_model).to_string(),
            model.id.to_string(),
            model.display_name.to_string(),
        ]);
    }
    let mut out = format!("{}\n\n{}\n", format_section_heading(provider.label), table);
    if let Some(link) = provider.api_key_help_link {
        out.push_str(&format!("\nGet an API key: {}\n", link));
    }
    out
}

/// Key status table. Keys are expected to be masked already.
pub fn format_key_status_text(
    catalog: &ProviderCatalog,
    masked_keys: &[(ProviderId, Option<String>)],
) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Provider", "Credential", "Key"]);
    for (id, masked) in masked_keys {
        let provider = catalog.resolve(*id);
        table.add_row(vec![
            provider.label.to_string(),
            provider.api_key_field_label.to_string(),
            masked.clone().unwrap_or_else(|| "missing".to_string()),
        ]);
    }
    format!("{}\n\n{}\n", format_section_heading("API keys"), table)
}

pub fn format_format_list_text() -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["ID", "Label"]);
    for format in FormatId::ALL {
        table.add_row(vec![format.as_str(), format.label()]);
    }
    format!("{}\n\n{}\n", format_section_heading("Output formats"), table)
}

pub fn format_format_show_text(format_id: FormatId) -> String {
    format!(
        "{}\n{}",
        format_section_heading(format_id.label()),
        format::template(format_id)
    )
}
