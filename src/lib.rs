//! agentprompt: reusable prompt agents with structured output formats
//!
//! An agent pairs custom instructions with an output format template and a
//! provider/model choice. Agents and provider settings persist in a local
//! key-value store; generation goes through a dispatcher that normalizes
//! provider responses and failures.

pub mod agent;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod provider;
pub mod session;
pub mod settings;
pub mod store;
pub mod tooling;
