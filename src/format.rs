//! Output format registry.
//!
//! Maps an output-format identifier to the structural template the model must
//! follow. Unknown or absent identifiers resolve to `detailed_text`.

pub mod templates;

use crate::error::ApiError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatId {
    RewritePerfectly,
    ClaudeStyle,
    Json,
    PseudoDsl,
    /// Also the landing spot for identifiers this build does not know.
    #[serde(other)]
    DetailedText,
}

impl FormatId {
    /// All formats in display order.
    pub const ALL: [FormatId; 5] = [
        FormatId::RewritePerfectly,
        FormatId::DetailedText,
        FormatId::ClaudeStyle,
        FormatId::Json,
        FormatId::PseudoDsl,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormatId::RewritePerfectly => "rewrite_perfectly",
            FormatId::ClaudeStyle => "claude_style",
            FormatId::Json => "json",
            FormatId::PseudoDsl => "pseudo_dsl",
            FormatId::DetailedText => "detailed_text",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormatId::RewritePerfectly => "Rewrite Perfectly",
            FormatId::ClaudeStyle => "Claude AI Style",
            FormatId::Json => "JSON",
            FormatId::PseudoDsl => "Pseudo DSL",
            FormatId::DetailedText => "Detailed Text",
        }
    }
}

impl Default for FormatId {
    fn default() -> Self {
        FormatId::DetailedText
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatId {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatId::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| ApiError::UnknownFormat(s.to_string()))
    }
}

/// Resolve a raw identifier to its template, falling back to `detailed_text`.
pub fn lookup(format_id: Option<&str>) -> Cow<'static, str> {
    let format = format_id
        .and_then(|raw| raw.parse::<FormatId>().ok())
        .unwrap_or_default();
    template(format)
}

/// Template for a known format, with live values substituted.
pub fn template(format: FormatId) -> Cow<'static, str> {
    template_at(format, Utc::now())
}

/// Template for a format using an explicit clock for substitutions.
pub fn template_at(format: FormatId, now: DateTime<Utc>) -> Cow<'static, str> {
    match format {
        FormatId::RewritePerfectly => Cow::Borrowed(templates::REWRITE_PERFECTLY),
        FormatId::ClaudeStyle => Cow::Borrowed(templates::CLAUDE_STYLE),
        FormatId::PseudoDsl => Cow::Borrowed(templates::PSEUDO_DSL),
        FormatId::DetailedText => Cow::Borrowed(templates::DETAILED_TEXT),
        FormatId::Json => Cow::Owned(templates::JSON.replace(
            templates::GENERATED_AT_PLACEHOLDER,
            &now.to_rfc3339_opts(SecondsFormat::Millis, true),
        )),
    }
}
