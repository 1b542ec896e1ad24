//! Agent registry: the in-memory agent list and active selection.
//!
//! Holds the aggregate and delegates persistence to the storage port. Every
//! committed mutation re-checks the active selection and writes both the agent
//! slot and the active-id slot.

use crate::agent::domain::Agent;
use crate::agent::id::generate_agent_id;
use crate::agent::repair::repair_agent;
use crate::agent::storage::AgentStorage;
use crate::error::ApiError;
use crate::provider::ProviderCatalog;
use std::sync::Arc;

/// Result of [`AgentRegistry::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedAgent {
    /// A new agent was appended under this id; callers usually select it.
    Created(String),
    /// An existing agent was replaced in place.
    Updated(String),
}

impl SavedAgent {
    pub fn id(&self) -> &str {
        match self {
            SavedAgent::Created(id) | SavedAgent::Updated(id) => id,
        }
    }
}

/// Result of [`AgentRegistry::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The confirmation collaborator declined.
    Cancelled,
}

pub struct AgentRegistry {
    agents: Vec<Agent>,
    active_agent_id: Option<String>,
    storage: Arc<dyn AgentStorage>,
    catalog: ProviderCatalog,
}

impl AgentRegistry {
    /// Load agents from storage, repairing them against the catalog.
    ///
    /// Corrupt persisted data is logged and treated as an empty list. An empty
    /// list is replaced by one default agent. The repaired state is written
    /// back before returning.
    pub fn load(storage: Arc<dyn AgentStorage>, catalog: ProviderCatalog) -> Result<Self, ApiError> {
        let mut agents = match storage.list() {
            Ok(agents) => agents,
            Err(ApiError::CorruptData { slot, reason }) => {
                tracing::warn!(slot = %slot, reason = %reason, "Discarding corrupt agent data");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        for agent in agents.iter_mut() {
            if agent.id.is_empty() {
                agent.id = generate_agent_id();
            }
            repair_agent(agent, &catalog);
        }

        if agents.is_empty() {
            let agent = Agent::default_with_id(generate_agent_id());
            tracing::info!(agent_id = %agent.id, "Created default agent");
            agents.push(agent);
        }

        let persisted_active = match storage.active_agent_id() {
            Ok(id) => id,
            Err(ApiError::CorruptData { slot, reason }) => {
                tracing::warn!(slot = %slot, reason = %reason, "Discarding corrupt active agent id");
                None
            }
            Err(e) => return Err(e),
        };

        let mut registry = Self {
            agents,
            active_agent_id: persisted_active,
            storage,
            catalog,
        };
        registry.reconcile_active();
        registry.persist()?;

        tracing::debug!(
            count = registry.agents.len(),
            active = ?registry.active_agent_id,
            "Loaded agents"
        );
        Ok(registry)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn get(&self, agent_id: &str) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id == agent_id)
    }

    /// Get an agent by id or return an error
    pub fn get_or_error(&self, agent_id: &str) -> Result<&Agent, ApiError> {
        self.get(agent_id)
            .ok_or_else(|| ApiError::AgentNotFound(agent_id.to_string()))
    }

    pub fn active_agent_id(&self) -> Option<&str> {
        self.active_agent_id.as_deref()
    }

    pub fn active(&self) -> Option<&Agent> {
        self.active_agent_id
            .as_deref()
            .and_then(|id| self.get(id))
    }

    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    /// Make an existing agent the active one.
    pub fn select(&mut self, agent_id: &str) -> Result<&Agent, ApiError> {
        self.get_or_error(agent_id)?;
        self.active_agent_id = Some(agent_id.to_string());
        self.persist()?;
        tracing::info!(agent_id, "Selected agent");
        self.get_or_error(agent_id)
    }

    /// Insert or replace an agent.
    ///
    /// An agent whose id is already stored replaces that entry in place. Any
    /// other agent is appended under a freshly generated id. Both paths repair
    /// the provider/model pair first.
    pub fn save(&mut self, mut agent: Agent) -> Result<SavedAgent, ApiError> {
        repair_agent(&mut agent, &self.catalog);

        let saved = match self.agents.iter().position(|a| a.id == agent.id) {
            Some(index) if !agent.id.is_empty() => {
                let id = agent.id.clone();
                self.agents[index] = agent;
                SavedAgent::Updated(id)
            }
            _ => {
                agent.id = generate_agent_id();
                let id = agent.id.clone();
                self.agents.push(agent);
                SavedAgent::Created(id)
            }
        };

        self.reconcile_active();
        self.persist()?;
        tracing::info!(agent_id = saved.id(), created = matches!(saved, SavedAgent::Created(_)), "Saved agent");
        Ok(saved)
    }

    /// Delete an agent after confirmation.
    ///
    /// The last remaining agent cannot be deleted. `confirm` is only consulted
    /// once the request is otherwise valid. Deleting the active agent moves the
    /// selection to the first remaining agent.
    pub fn delete<F>(&mut self, agent_id: &str, confirm: F) -> Result<DeleteOutcome, ApiError>
    where
        F: FnOnce(&Agent) -> bool,
    {
        let index = self
            .agents
            .iter()
            .position(|a| a.id == agent_id)
            .ok_or_else(|| ApiError::AgentNotFound(agent_id.to_string()))?;

        if self.agents.len() <= 1 {
            return Err(ApiError::LastAgent);
        }

        if !confirm(&self.agents[index]) {
            tracing::debug!(agent_id, "Agent deletion cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.agents.remove(index);
        self.reconcile_active();
        self.persist()?;
        tracing::info!(agent_id, "Deleted agent");
        Ok(DeleteOutcome::Deleted)
    }

    /// Reset an active id that no longer resolves to the first agent or none.
    fn reconcile_active(&mut self) {
        let resolves = self
            .active_agent_id
            .as_deref()
            .is_some_and(|id| self.agents.iter().any(|a| a.id == id));
        if !resolves {
            self.active_agent_id = self.agents.first().map(|a| a.id.clone());
        }
    }

    fn persist(&self) -> Result<(), ApiError> {
        self.storage.save_all(&self.agents)?;
        self.storage
            .set_active_agent_id(self.active_agent_id.as_deref())
    }
}
