mod error;
mod final_answer;
mod interface;
mod registry;

pub use error::ToolInvokeError;
pub use final_answer::{FINAL_ANSWER_TOOL_NAME, ReturnFinalAnswerTool};
pub use interface::{Tool, ToolParam};
pub use registry::ToolRegistry;
