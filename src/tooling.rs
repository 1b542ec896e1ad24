//! Tooling & Integration Layer
//!
//! Command-line surface over the session and its text renderers.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
