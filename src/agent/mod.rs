//! Agent profiles
//!
//! An agent is a named, persistent bundle of custom instructions, output
//! format, provider, and model. The registry owns the agent list and the
//! active selection; storage persists both through the settings store.

pub mod domain;
mod id;
mod prompt;
pub mod registry;
pub mod repair;
pub mod storage;

pub use domain::{validate_agent, Agent};
pub use id::generate_agent_id;
pub use prompt::{compose, compose_at, FORMAT_DIRECTIVE, FORMAT_HEADER};
pub use registry::{AgentRegistry, DeleteOutcome, SavedAgent};
pub use repair::{change_provider, repair_agent};
pub use storage::{AgentStorage, KvAgentStorage};
