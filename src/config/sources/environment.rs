//! Environment variable source: AGENTPROMPT__ prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "AGENTPROMPT";

/// Add environment variable overlay to builder.
///
/// `AGENTPROMPT__STORAGE__STORE_PATH=/tmp/s` sets `storage.store_path`. The
/// double underscore after the prefix keeps `AGENTPROMPT_LOG*` variables,
/// which the logging layer reads directly, out of the config tree.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
