//! Global config file source: `$XDG_CONFIG_HOME/agentprompt/config.toml`

use crate::config::paths::xdg_root;
use config::builder::DefaultState;
use config::{ConfigBuilder, File};

/// Add the global config file when it can be located. A missing file is not an error.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    match xdg_root::global_config_file() {
        Ok(path) => builder.add_source(File::from(path).required(false)),
        Err(e) => {
            tracing::debug!(error = %e, "Skipping global config file");
            builder
        }
    }
}
