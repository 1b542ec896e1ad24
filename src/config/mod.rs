//! Configuration
//!
//! Layered application config: built-in defaults, then the global
//! `config.toml`, then `AGENTPROMPT__*` environment variables. An explicit
//! `--config` file replaces the global file.

mod facade;
pub mod paths {
    pub mod xdg_root;
}
mod merge {
    pub mod service;
}
mod sources {
    pub mod environment;
    pub mod global_file;
}

pub use facade::ConfigLoader;
pub use merge::service::MergeService;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::provider::clients::{DEFAULT_APP_TITLE, DEFAULT_GEMINI_BASE_URL, OPENROUTER_CHAT_URL};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub providers: ProviderEndpoints,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Settings store directory; `None` uses `$XDG_DATA_HOME/agentprompt/store`.
    pub store_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolve_store_path(&self) -> Result<PathBuf, ApiError> {
        match &self.store_path {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => paths::xdg_root::default_store_path(),
        }
    }
}

/// Endpoints and headers for the HTTP transports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderEndpoints {
    pub google_base_url: String,
    pub openrouter_url: String,
    /// Sent to OpenRouter as `X-Title`.
    pub app_title: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            google_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            openrouter_url: OPENROUTER_CHAT_URL.to_string(),
            app_title: DEFAULT_APP_TITLE.to_string(),
        }
    }
}
