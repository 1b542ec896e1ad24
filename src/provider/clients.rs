//! Provider transports.
//!
//! A transport performs exactly one completion call and reports either the
//! raw text (absent when the provider returned none) or a normalized
//! [`GenerationError`]. Postprocessing happens in the dispatcher.

pub mod gemini;
pub mod openrouter;

pub use gemini::{GeminiClient, DEFAULT_GEMINI_BASE_URL};
pub use openrouter::{OpenRouterClient, DEFAULT_APP_TITLE, OPENROUTER_CHAT_URL};

use crate::error::GenerationError;
use async_trait::async_trait;

/// Single-turn completion request as seen by a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub api_key: String,
    pub model_id: String,
    pub user_input: String,
    pub system_instruction: String,
    pub temperature: f32,
    /// Ask for the provider's native JSON response mode.
    pub json_mode: bool,
    /// Reasoning budget override; `None` keeps the provider default.
    pub thinking_budget: Option<u32>,
}

#[async_trait]
pub trait GenerationTransport: Send + Sync {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<Option<String>, GenerationError>;
}
