//! Integration tests for agent persistence, generation, and the HTTP transports

mod agent_lifecycle;
mod cli_contracts;
mod gemini_transport;
mod generation_flow;
mod openrouter_transport;
mod support;
