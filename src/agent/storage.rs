//! Agent storage: persist and load the agent list and active selection.

use crate::agent::domain::Agent;
use crate::error::ApiError;
use crate::store::{KeyValueStore, ACTIVE_AGENT_KEY, AGENTS_KEY};
use std::sync::Arc;

pub trait AgentStorage: Send + Sync {
    /// Persisted agents in stored order. An absent slot is an empty list.
    fn list(&self) -> Result<Vec<Agent>, ApiError>;
    fn save_all(&self, agents: &[Agent]) -> Result<(), ApiError>;
    fn active_agent_id(&self) -> Result<Option<String>, ApiError>;
    /// `None` removes the slot.
    fn set_active_agent_id(&self, agent_id: Option<&str>) -> Result<(), ApiError>;
}

/// Agent storage over the settings key-value store.
pub struct KvAgentStorage {
    store: Arc<dyn KeyValueStore>,
}

impl KvAgentStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl AgentStorage for KvAgentStorage {
    fn list(&self) -> Result<Vec<Agent>, ApiError> {
        let Some(raw) = self.store.get(AGENTS_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|e| ApiError::CorruptData {
            slot: AGENTS_KEY.to_string(),
            reason: e.to_string(),
        })
    }

    fn save_all(&self, agents: &[Agent]) -> Result<(), ApiError> {
        let raw = serde_json::to_string(agents)
            .map_err(|e| ApiError::StorageError(format!("Failed to encode agents: {}", e)))?;
        self.store.set(AGENTS_KEY, &raw)
    }

    fn active_agent_id(&self) -> Result<Option<String>, ApiError> {
        Ok(self
            .store
            .get(ACTIVE_AGENT_KEY)?
            .filter(|id| !id.is_empty()))
    }

    fn set_active_agent_id(&self, agent_id: Option<&str>) -> Result<(), ApiError> {
        match agent_id {
            Some(id) => self.store.set(ACTIVE_AGENT_KEY, id),
            None => self.store.remove(ACTIVE_AGENT_KEY),
        }
    }
}
