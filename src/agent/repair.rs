//! Provider/model consistency repair.
//!
//! Runs on load, on save, and whenever an agent's provider changes. Unknown
//! providers become the catalog's first provider; a model missing from the
//! resolved provider's list becomes that provider's default model, its first
//! model, or empty, in that order.

use crate::agent::domain::Agent;
use crate::provider::ProviderCatalog;

/// Repair an agent in place. Returns whether anything changed.
pub fn repair_agent(agent: &mut Agent, catalog: &ProviderCatalog) -> bool {
    let provider = catalog.resolve_str(&agent.provider_id);
    let mut changed = false;

    if agent.provider_id != provider.id.as_str() {
        tracing::debug!(
            agent_id = %agent.id,
            from = %agent.provider_id,
            to = %provider.id,
            "Repairing unknown provider"
        );
        agent.provider_id = provider.id.as_str().to_string();
        changed = true;
    }

    if !provider.has_model(&agent.model_id) {
        let fallback = provider.default_model_id();
        if agent.model_id != fallback {
            tracing::debug!(
                agent_id = %agent.id,
                from = %agent.model_id,
                to = %fallback,
                "Repairing model outside provider list"
            );
            agent.model_id = fallback;
            changed = true;
        }
    }

    changed
}

/// Switch an agent to another provider, keeping the model only if it is
/// offered there.
pub fn change_provider(agent: &mut Agent, provider_id: &str, catalog: &ProviderCatalog) {
    agent.provider_id = provider_id.to_string();
    repair_agent(agent, catalog);
}
