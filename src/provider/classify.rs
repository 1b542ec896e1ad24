//! Maps generation failures to user-facing guidance.
//!
//! Matching is a best-effort heuristic over HTTP status codes and substrings
//! of provider messages; upstream wording can change without notice.

use crate::error::{FailureKind, GenerationError};
use crate::provider::ProviderId;

const DIVIDER: &str = "\n────────────────────\n";

/// Failure category recognized from a transport error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    QuotaExhausted,
    InvalidArgument,
    PermissionDenied,
    AggregatorRateLimited,
    AggregatorPaymentRequired,
    Unclassified,
}

pub fn classify(error: &GenerationError) -> FailureClass {
    if error.kind != FailureKind::TransportError {
        return FailureClass::Unclassified;
    }

    if error.provider == Some(ProviderId::OpenRouter) {
        match error.status {
            Some(429) => return FailureClass::AggregatorRateLimited,
            Some(402) => return FailureClass::AggregatorPaymentRequired,
            _ => {}
        }
    }

    let message = error.message.to_lowercase();
    let mentions = |needles: &[&str]| needles.iter().any(|n| message.contains(n));

    if error.status == Some(429)
        || mentions(&["resource_exhausted", "resource has been exhausted", "quota", "rate limit", "429"])
    {
        FailureClass::QuotaExhausted
    } else if mentions(&["invalid_argument", "invalid argument"]) {
        FailureClass::InvalidArgument
    } else if error.status == Some(403) || mentions(&["permission_denied", "permission denied"]) {
        FailureClass::PermissionDenied
    } else {
        FailureClass::Unclassified
    }
}

fn guidance(class: FailureClass) -> Option<&'static str> {
    let text = match class {
        FailureClass::QuotaExhausted => {
            "Quota or rate limit reached for this provider.\n\n\
             Common causes:\n\
             • Too many requests in a short period\n\
             • The daily or per-minute quota for this model is used up\n\
             • Free-tier limits apply to the selected model\n\n\
             What you can do:\n\
             • Wait a minute and try again\n\
             • Switch the agent to a different model\n\
             • Switch the agent to another provider (for example OpenRouter)"
        }
        FailureClass::InvalidArgument => {
            "The provider rejected the request as invalid.\n\n\
             Please check:\n\
             • The input is not too long for the selected model\n\
             • The input and instructions comply with the provider's content policy\n\
             • The API key has the expected format for this provider"
        }
        FailureClass::PermissionDenied => {
            "The provider denied access.\n\n\
             Please check:\n\
             • The API key is valid and has not been revoked\n\
             • Your account has access to the selected model\n\
             • Billing is enabled for the project that owns the key"
        }
        FailureClass::AggregatorRateLimited => {
            "OpenRouter rate limit reached (HTTP 429).\n\n\
             What you can do:\n\
             • Wait a moment and try again\n\
             • Switch to a different model\n\
             • Upgrade your OpenRouter tier for higher limits"
        }
        FailureClass::AggregatorPaymentRequired => {
            "OpenRouter reports insufficient credits (HTTP 402).\n\n\
             What you can do:\n\
             • Check your OpenRouter account balance\n\
             • Add credit to your account\n\
             • Switch to a free model (ids ending in \":free\")"
        }
        FailureClass::Unclassified => return None,
    };
    Some(text)
}

/// Guidance text followed by the underlying message, or the message alone.
pub fn describe(error: &GenerationError) -> String {
    match guidance(classify(error)) {
        Some(text) => format!("{}\n\nDetails: {}", text, error.message),
        None => error.message.clone(),
    }
}

/// Final user-facing rendering of a failure message.
///
/// Adds an `Error:` header when missing. Multi-line bodies get paragraph
/// breaks replaced by a divider and leading bullets turned into arrows.
pub fn render(message: &str) -> String {
    let body = if message.trim_start().starts_with("Error:") {
        message.to_string()
    } else {
        format!("Error: {}", message)
    };

    if !body.contains('\n') {
        return body;
    }

    body.split("\n\n")
        .map(|paragraph| {
            paragraph
                .lines()
                .map(normalize_bullet)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join(DIVIDER)
}

fn normalize_bullet(line: &str) -> String {
    let trimmed = line.trim_start();
    for bullet in ["• ", "- ", "* "] {
        if let Some(rest) = trimmed.strip_prefix(bullet) {
            let indent = &line[..line.len() - trimmed.len()];
            return format!("{}→ {}", indent, rest);
        }
    }
    line.to_string()
}

/// Classify and render in one step.
pub fn user_message(error: &GenerationError) -> String {
    render(&describe(error))
}
