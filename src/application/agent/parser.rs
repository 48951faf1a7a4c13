//! Reply parsing: turn a free-text model reply into a tool invocation.

use once_cell::sync::Lazy;
use regex::Regex;

use super::prompt::{NEXT_THOUGHT_TOKEN, OBSERVATION_TOKEN};
use crate::application::tooling::FINAL_ANSWER_TOOL_NAME;
use crate::domain::extraction::extract_structured_value;

/// Outcome of parsing one model reply.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ParsedReply {
    /// An `Action:` / `Action Input:` pair was found.
    Action { tool: String, input: String },
    /// No action formatting, but the reply body decodes to a map carrying
    /// `final_answer`: treated as an implicit terminal-tool invocation.
    ImplicitFinal { payload: String },
    /// Nothing recognizable. The instruction doubles as a sentinel tool name
    /// (it can never collide with a registered name) and as the corrective
    /// text fed back to the model.
    Unparsable { instruction: String },
}

/// `Action:` up to a line break, then the first balanced-brace value after
/// `Action Input:`, allowing one level of nested braces.
static ACTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)Action:\s*\[?(.*?)\]?\s*[\r\n]+Action Input:.*?(\{[^{}]*(?:\{[^{}]*\})*[^{}]*\})")
        .expect("valid pattern")
});

pub(crate) fn parse_reply(generated: &str, quoted_tool_names: &str) -> ParsedReply {
    if let Some(captures) = ACTION_PATTERN.captures(generated) {
        let tool = captures[1].trim().to_string();
        // Guard against the model hallucinating its own continuation inside
        // the captured span.
        let input = &captures[2];
        let input = input.split(OBSERVATION_TOKEN).next().unwrap_or(input);
        let input = input.split(NEXT_THOUGHT_TOKEN).next().unwrap_or(input);
        return ParsedReply::Action {
            tool,
            input: strip_enclosing_quotes(input.trim()).to_string(),
        };
    }

    if let Some(value) = extract_structured_value(generated) {
        if value.get("final_answer").is_some() {
            return ParsedReply::ImplicitFinal {
                payload: value.to_string(),
            };
        }
    }

    ParsedReply::Unparsable {
        instruction: format!(
            "TOOL ERROR. MAKE SURE TO STATE A TOOL NAME FROM THE LIST: {quoted_tool_names}. \
             If you are trying to end the conversation or you think the task is already solved, \
             please use the \"Action: {FINAL_ANSWER_TOOL_NAME}\" and give the final answer this way."
        ),
    }
}

/// Remove at most one pair of enclosing double quotes.
fn strip_enclosing_quotes(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(text)
}
