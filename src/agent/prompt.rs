//! System instruction composition owned by the agent domain.

use crate::agent::domain::Agent;
use crate::format;
use chrono::{DateTime, Utc};

pub const FORMAT_HEADER: &str = "### OUTPUT FORMAT INSTRUCTIONS & STRUCTURE TO POPULATE:";
pub const FORMAT_DIRECTIVE: &str = "You MUST generate your entire response strictly following this structure and its rules. Use the user's input to fill in the content for the placeholders or sections described.";

/// Compose the system instruction for an agent: its custom instructions
/// followed by the output format contract.
pub fn compose(agent: &Agent) -> String {
    compose_at(agent, Utc::now())
}

/// Same as [`compose`] with an explicit clock for template substitutions.
pub fn compose_at(agent: &Agent, now: DateTime<Utc>) -> String {
    let template = format::template_at(agent.output_format, now);
    format!(
        "{}\n\n{}\n{}\n{}",
        agent.custom_instructions, FORMAT_HEADER, FORMAT_DIRECTIVE, template
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{templates, FormatId};
    use chrono::TimeZone;

    fn agent(instructions: &str, format: FormatId) -> Agent {
        Agent {
            custom_instructions: instructions.to_string(),
            output_format: format,
            ..Agent::default()
        }
    }

    #[test]
    fn instructions_come_first_then_format_contract() {
        let composed = compose(&agent("Be terse.", FormatId::PseudoDsl));
        let expected = format!(
            "Be terse.\n\n{}\n{}\n{}",
            FORMAT_HEADER,
            FORMAT_DIRECTIVE,
            templates::PSEUDO_DSL
        );
        assert_eq!(composed, expected);
    }

    #[test]
    fn composition_is_deterministic_for_a_fixed_clock() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let a = agent("Emit data.", FormatId::Json);
        assert_eq!(compose_at(&a, now), compose_at(&a, now));
        assert!(compose_at(&a, now).contains("2025-01-02T03:04:05.000Z"));
    }

    #[test]
    fn empty_instructions_still_carry_the_contract() {
        let composed = compose(&agent("", FormatId::DetailedText));
        assert!(composed.starts_with("\n\n### OUTPUT FORMAT"));
        assert!(composed.ends_with(templates::DETAILED_TEXT));
    }
}
