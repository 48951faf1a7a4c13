//! Prompt template and rendering for the decision loop.
//!
//! The template is the loop's wire format: the model is instructed to emit
//! `Action:` / `Action Input:` lines, and generation is stopped before it
//! can fabricate an `Observation:` of its own.

use chrono::Local;

pub(crate) const OBSERVATION_TOKEN: &str = "Observation:";
pub(crate) const NEXT_THOUGHT_TOKEN: &str = "Next Thought:";

/// Slot substituted with the running transcript on every iteration.
pub(crate) const PREVIOUS_RESPONSES_SLOT: &str = "{previous_responses}";

const PARAM_VALUE_EXAMPLE: &str = r#"{"param": "value"}"#;
const FINAL_ANSWER_EXAMPLE: &str = r#"{"final_answer": "the final answer to return to the user"}"#;

/// Default prompt template. Placeholders: `{today}`, `{tool_description}`,
/// `{tool_names}`, `{goal}`, `{param_value_dict}`, `{final_answer_dict}`,
/// and `{previous_responses}` (filled per iteration).
pub const PROMPT_TEMPLATE: &str = r#"Today is {today} and you can use tools to get new information.
Respond to the user's input as best as you can using the following tools:

{tool_description}

First Thought:
Thought: comment on what you want to do next.
Action: the action to take, exactly one element of [{tool_names}]
Action Input: the input to the action (must be a single line json loadable dictionary of parameters e.g. {param_value_dict})
Observation: the result of the action
Next Thought: (7 thoughts left)
Thought: Now comment on what you want to do next.
Action: the next action to take, exactly one element of [{tool_names}]
Action Input: the input to the next action (must be a single line json loadable dictionary of parameters e.g. {param_value_dict})
Observation: the result of the next action
... (this Thought/Action/Action Input/Observation repeats until you are sure of the answer)
Next Thought: (6 thoughts left)
Thought: Now comment on what you want to do next.
Action: the next action to take, exactly one element of [{tool_names}]
Action Input: the input to the next action (must be a single line json loadable dictionary of parameters e.g. {param_value_dict})
Observation: the result of the next action
Next Thought: (5 thoughts left)
Thought: I can finally return the final answer
Action: Return Final Answer Tool
Action Input: {final_answer_dict}

YOU MUST END WITH THE "Return Final Answer Tool" TO RETURN THE FINAL ANSWER TO THE USER and the final answer must be in the "Action Input" field.

Begin:

##########
START GOAL
##########
{goal}
##########
END GOAL
##########

First Thought:
{previous_responses}
"#;

/// Stop sequences handed to the model on every call: plain and tab-indented
/// observation markers.
pub(crate) fn stop_sequences() -> Vec<String> {
    vec![
        format!("\n{OBSERVATION_TOKEN}"),
        format!("\n\t{OBSERVATION_TOKEN}"),
    ]
}

/// Render everything that is stable for the duration of a run, leaving only
/// the `{previous_responses}` slot open.
pub(crate) fn render_base(
    template: &str,
    tool_description: &str,
    tool_names: &str,
    goal: &str,
) -> String {
    template
        .replace("{today}", &Local::now().date_naive().to_string())
        .replace("{tool_description}", tool_description)
        .replace("{tool_names}", tool_names)
        .replace("{goal}", goal)
        .replace("{param_value_dict}", PARAM_VALUE_EXAMPLE)
        .replace("{final_answer_dict}", FINAL_ANSWER_EXAMPLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_base_fills_everything_but_the_transcript_slot() {
        let rendered = render_base(PROMPT_TEMPLATE, "Echo: repeats", "\"Echo\"", "say hi");
        assert!(rendered.contains("Echo: repeats"));
        assert!(rendered.contains("[\"Echo\"]"));
        assert!(rendered.contains("say hi"));
        assert!(rendered.contains(PARAM_VALUE_EXAMPLE));
        assert!(rendered.contains(FINAL_ANSWER_EXAMPLE));
        assert!(rendered.contains(PREVIOUS_RESPONSES_SLOT));
        assert!(!rendered.contains("{goal}"));
    }

    #[test]
    fn stop_sequences_cover_indented_observation() {
        let stop = stop_sequences();
        assert_eq!(stop, vec!["\nObservation:", "\n\tObservation:"]);
    }
}
