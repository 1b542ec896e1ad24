//! Key-value store for persisted settings slots.
//!
//! Every slot is a UTF-8 string addressed by a fixed key. Slots are read and
//! written independently; there is no transaction spanning several slots.

pub mod persistence;

pub use persistence::SledKeyValueStore;

use crate::error::ApiError;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Slot holding the provider selected in the settings panel.
pub const ACTIVE_PROVIDER_KEY: &str = "active_provider";
/// Slot holding the provider id to API key map (JSON object).
pub const API_KEYS_KEY: &str = "api_keys";
/// Slot holding the agent list (JSON array).
pub const AGENTS_KEY: &str = "agents";
/// Slot holding the active agent id.
pub const ACTIVE_AGENT_KEY: &str = "active_agent_id";

/// Key-value store interface
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ApiError>;
    fn remove(&self, key: &str) -> Result<(), ApiError>;
}

/// Process-local store used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        Ok(self.slots.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        self.slots.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ApiError> {
        self.slots.write().remove(key);
        Ok(())
    }
}
