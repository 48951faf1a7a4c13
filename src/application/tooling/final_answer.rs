use async_trait::async_trait;
use serde_json::Value;

use super::error::ToolInvokeError;
use super::interface::{Tool, ToolParam};

/// Registry name of the terminal tool. The prompt template and the reply
/// parser both refer to this exact string.
pub const FINAL_ANSWER_TOOL_NAME: &str = "Return Final Answer Tool";

/// The reserved terminal tool: invoking it ends the run successfully with
/// its `final_answer` argument as the task's raw output. It never fails; a
/// missing argument yields an empty answer.
#[derive(Debug, Default)]
pub struct ReturnFinalAnswerTool;

#[async_trait]
impl Tool for ReturnFinalAnswerTool {
    fn name(&self) -> &str {
        FINAL_ANSWER_TOOL_NAME
    }

    fn description(&self) -> &str {
        "This tool returns the final answer to the task. Pass all inputs as {\"final_answer\": \"your answer\"}"
    }

    fn parameters(&self) -> Vec<ToolParam> {
        vec![ToolParam::new(
            "final_answer",
            "the final answer to return to the user",
        )]
    }

    fn is_terminal(&self) -> bool {
        true
    }

    async fn run(&self, args: Value) -> Result<Value, ToolInvokeError> {
        Ok(args
            .get("final_answer")
            .cloned()
            .unwrap_or_else(|| Value::String(String::new())))
    }
}
