pub mod config;
pub mod validation;

pub use config::Agent;
pub use validation::validate_agent;
