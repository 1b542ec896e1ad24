//! Provider settings: the provider selected in settings and per-provider API keys.
//!
//! Loaded once before first use and written back after every mutation. Both
//! slots tolerate bad data. Unreadable bytes read as an empty slot and an
//! unknown provider id falls back to the catalog default. Non-string key
//! entries are dropped.

use crate::error::ApiError;
use crate::provider::{ProviderCatalog, ProviderId};
use crate::store::{KeyValueStore, ACTIVE_PROVIDER_KEY, API_KEYS_KEY};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct ProviderSettings {
    store: Arc<dyn KeyValueStore>,
    active_provider: ProviderId,
    /// Provider id to secret. Keys for providers unknown to this build are kept.
    api_keys: BTreeMap<String, String>,
}

impl ProviderSettings {
    pub fn load(store: Arc<dyn KeyValueStore>, catalog: &ProviderCatalog) -> Result<Self, ApiError> {
        let default_provider = catalog.default_provider().id;
        let active_provider = match read_slot(store.as_ref(), ACTIVE_PROVIDER_KEY)? {
            Some(raw) => match raw.parse::<ProviderId>() {
                Ok(id) if catalog.find(id).is_some() => id,
                _ => {
                    tracing::warn!(value = %raw, "Unknown active provider, using default");
                    default_provider
                }
            },
            None => default_provider,
        };

        let api_keys = match read_slot(store.as_ref(), API_KEYS_KEY)? {
            Some(raw) => decode_api_keys(&raw),
            None => BTreeMap::new(),
        };

        Ok(Self {
            store,
            active_provider,
            api_keys,
        })
    }

    pub fn active_provider(&self) -> ProviderId {
        self.active_provider
    }

    pub fn set_active_provider(&mut self, provider: ProviderId) -> Result<(), ApiError> {
        self.active_provider = provider;
        self.store.set(ACTIVE_PROVIDER_KEY, provider.as_str())?;
        tracing::info!(provider = %provider, "Active provider changed");
        Ok(())
    }

    /// The stored key for a provider. Empty keys count as missing.
    pub fn api_key(&self, provider: ProviderId) -> Option<&str> {
        self.api_keys
            .get(provider.as_str())
            .map(String::as_str)
            .filter(|key| !key.is_empty())
    }

    pub fn has_api_key(&self, provider: ProviderId) -> bool {
        self.api_key(provider).is_some()
    }

    /// Store a key. Surrounding whitespace is dropped; a blank key clears the entry.
    pub fn set_api_key(&mut self, provider: ProviderId, key: &str) -> Result<(), ApiError> {
        let key = key.trim();
        if key.is_empty() {
            return self.clear_api_key(provider);
        }
        self.api_keys
            .insert(provider.as_str().to_string(), key.to_string());
        self.persist_keys()?;
        tracing::info!(provider = %provider, "API key saved");
        Ok(())
    }

    pub fn clear_api_key(&mut self, provider: ProviderId) -> Result<(), ApiError> {
        if self.api_keys.remove(provider.as_str()).is_some() {
            self.persist_keys()?;
            tracing::info!(provider = %provider, "API key cleared");
        }
        Ok(())
    }

    /// Whether each catalog provider has a key, in catalog order.
    pub fn api_key_status(&self, catalog: &ProviderCatalog) -> Vec<(ProviderId, bool)> {
        catalog
            .providers()
            .iter()
            .map(|provider| (provider.id, self.has_api_key(provider.id)))
            .collect()
    }

    fn persist_keys(&self) -> Result<(), ApiError> {
        let raw = serde_json::to_string(&self.api_keys)
            .map_err(|e| ApiError::StorageError(format!("Failed to encode API keys: {}", e)))?;
        self.store.set(API_KEYS_KEY, &raw)
    }
}

/// Read a slot, treating undecodable bytes as an empty slot.
fn read_slot(store: &dyn KeyValueStore, key: &str) -> Result<Option<String>, ApiError> {
    match store.get(key) {
        Ok(value) => Ok(value),
        Err(ApiError::CorruptData { slot, reason }) => {
            tracing::warn!(slot = %slot, reason = %reason, "Discarding corrupt settings slot");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Decode the key map, keeping every string entry and dropping the rest.
fn decode_api_keys(raw: &str) -> BTreeMap<String, String> {
    let entries: serde_json::Map<String, Value> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(slot = API_KEYS_KEY, error = %e, "Discarding corrupt API key map");
            return BTreeMap::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|(provider, value)| match value {
            Value::String(key) => Some((provider, key)),
            other => {
                tracing::warn!(provider = %provider, value = %other, "Dropping non-string API key entry");
                None
            }
        })
        .collect()
}

/// Mask a secret for display, keeping only its last four characters.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
