//! Bounded ReAct-style agent loop.
//!
//! Given a goal and a registry of tools, an [`Agent`] repeatedly renders a
//! prompt, asks a [`ModelProvider`] for the next action, parses the free-text
//! reply into a tool invocation, executes the tool, and feeds the result back
//! as an observation. The loop ends when the reserved final-answer tool fires
//! or the loop budget is exhausted.
//!
//! Model replies are treated as unreliable input: parsing falls back from
//! strict `Action:` / `Action Input:` formatting through embedded-JSON
//! recovery down to a corrective sentinel that teaches the model the valid
//! tool names. Every recoverable failure is logged and folded back into the
//! transcript instead of aborting the run.
//!
//! Concrete tools and model backends are the caller's concern: implement
//! [`Tool`] and [`ModelProvider`] and hand them in.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::agent::{
    Agent, AgentError, AgentEvent, AgentOptions, LoopError, PROMPT_TEMPLATE,
};
pub use application::tooling::{
    FINAL_ANSWER_TOOL_NAME, ReturnFinalAnswerTool, Tool, ToolInvokeError, ToolParam, ToolRegistry,
};
pub use domain::{
    ChatMessage, Conversation, MessageRole, OutputFormat, Task, extract_structured_value,
};
pub use infrastructure::model::{ModelError, ModelProvider};
