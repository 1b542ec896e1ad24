//! Provider profile: identifiers, model definitions, and static config shape.

pub mod config;

pub use config::{ModelDefinition, ProviderConfig, ProviderId};
