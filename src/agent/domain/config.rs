//! Agent record owned by the agent domain.

use crate::format::FormatId;
use crate::provider::catalog::LOW_LATENCY_GOOGLE_MODEL;
use crate::provider::ProviderId;
use serde::{Deserialize, Serialize};

const DEFAULT_NAME: &str = "Frontend Design & Harmony Expert";
const DEFAULT_DESCRIPTION: &str = "Helps craft beautiful, functional UIs with expert advice on code, design patterns, and color psychology.";
const DEFAULT_INPUT_PLACEHOLDER: &str = "How can I improve the UX of my e-commerce checkout page? or e.g. Provide a React component for a re...";
const DEFAULT_INSTRUCTIONS: &str = r#"You are an AI Frontend Design & Harmony Expert. Your primary task is to take the user's input (a design question, code snippet, UI problem, or a request for UI elements) and generate a well-structured, insightful, and actionable output.
The structure of your output is CRITICALLY defined by the "OUTPUT FORMAT INSTRUCTIONS" that will be provided to you. You MUST adhere strictly to the specified format.
Your goal is to provide expert-level advice, code, or structured content related to frontend development, UI/UX design, design patterns, and even color psychology, all within the chosen output format.
If the user's input is a request for you to perform an action (e.g., "critique this landing page design"), then perform that action and present the result within the chosen output format.
If the user's input is raw content or a problem statement, then analyze it and provide solutions/insights structured according to the chosen output format.

Key Principles:
1.  **Adhere to Format:** The selected "Output Format" and its example structure are paramount.
2.  **Expert Insights:** Provide valuable, actionable, and well-reasoned frontend and design advice.
3.  **Clarity & Conciseness:** Within the given structure, aim for clear and concise content.

Your output MUST ONLY be the structured content in the specified format. Do not include any preambles, apologies, or meta-commentary outside of what the format itself might define.
"#;

/// A saved agent profile.
///
/// Serialized with camelCase keys. Fields missing from a persisted record take
/// the default agent's values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Agent {
    /// Unique, immutable once created. Empty means "not yet saved".
    pub id: String,
    pub name: String,
    pub description: String,
    pub input_placeholder: String,
    pub output_format: FormatId,
    pub custom_instructions: String,
    /// Raw provider id; may name a provider the catalog no longer knows.
    pub provider_id: String,
    pub model_id: String,
}

impl Agent {
    /// The default agent properties under the given id.
    pub fn default_with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: DEFAULT_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            input_placeholder: DEFAULT_INPUT_PLACEHOLDER.to_string(),
            output_format: FormatId::RewritePerfectly,
            custom_instructions: DEFAULT_INSTRUCTIONS.to_string(),
            provider_id: ProviderId::Google.as_str().to_string(),
            model_id: LOW_LATENCY_GOOGLE_MODEL.to_string(),
        }
    }
}
