//! Provider domain: catalog, transports, dispatch, and failure classification.

pub mod catalog;
pub mod classify;
pub mod clients;
pub mod generation;
pub mod profile;

pub use catalog::ProviderCatalog;
pub use generation::{GenerationDispatcher, GenerationRequest};
pub use profile::{ModelDefinition, ProviderConfig, ProviderId};
