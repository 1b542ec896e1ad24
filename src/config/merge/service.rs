//! MergeService: orchestrates sources and deserializes to AppConfig.

use crate::config::sources::{environment, global_file};
use crate::config::AppConfig;
use crate::provider::clients::{DEFAULT_APP_TITLE, DEFAULT_GEMINI_BASE_URL, OPENROUTER_CHAT_URL};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from the standard sources.
    /// Precedence: defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<AppConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder);
        let builder = environment::add_to_builder(builder);

        builder.build()?.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<AppConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        let builder = environment::add_to_builder(builder);

        builder.build()?.try_deserialize()
    }

    /// Load config from an in-memory TOML document, without environment overlay.
    pub fn load_from_str(toml: &str) -> Result<AppConfig, ConfigError> {
        builder_with_defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("providers.google_base_url", DEFAULT_GEMINI_BASE_URL)?
        .set_default("providers.openrouter_url", OPENROUTER_CHAT_URL)?
        .set_default("providers.app_title", DEFAULT_APP_TITLE)
}
