use serde::Serialize;
use serde_json::Value;

use super::prompt::PROMPT_TEMPLATE;

const DEFAULT_MAX_LOOPS: usize = 5;

/// Discrete lifecycle events of a run. The lazy mode yields these as they
/// happen; the eager mode returns the same sequence batched. Content and
/// ordering are identical in both modes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AgentEvent {
    NextAgentAction {
        #[serde(rename = "loop")]
        loop_index: usize,
        tool: String,
        tool_input: Value,
        generated: String,
    },
    ToolSelected {
        tool: String,
    },
    ToolRun {
        tool: String,
        tool_input: Value,
        tool_result: String,
    },
    ToolError {
        message: String,
    },
    ToolResult {
        tool: String,
        result: String,
    },
    Error {
        message: String,
    },
    AgentCompleted {
        final_answer: String,
    },
    MaxLoopsReached {
        message: String,
    },
}

/// Construction-time knobs for an [`Agent`](super::Agent).
#[derive(Debug, Clone)]
pub struct AgentOptions {
    pub name: String,
    pub prompt_template: String,
    /// Loop budget; every iteration consumes one unit, including iterations
    /// spent recovering from an invalid tool choice.
    pub max_loops: usize,
    /// Skip tool execution and substitute a fixed placeholder, for dry-run
    /// prompt testing without side effects.
    pub tool_eval_mode: bool,
    /// Prepend the conversation to every model call and append the final
    /// rendered prompt after success.
    pub use_conversation: bool,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            name: "Agent".to_string(),
            prompt_template: PROMPT_TEMPLATE.to_string(),
            max_loops: DEFAULT_MAX_LOOPS,
            tool_eval_mode: false,
            use_conversation: false,
        }
    }
}
