use thiserror::Error;

use crate::infrastructure::model::ModelError;

/// The only abnormal exit from a run: a model backend violating its
/// contract. Everything the loop itself can cause is a recoverable
/// [`LoopError`] and never propagates.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Recoverable per-iteration failures, appended to the agent's error log for
/// post-hoc inspection. Each one is folded back into the loop as an
/// observation or an empty argument set rather than raised.
#[derive(Debug, Error)]
pub enum LoopError {
    #[error("unknown tool: {tool} (valid tools: {valid})")]
    UnknownTool { tool: String, valid: String },
    #[error("tool input is not a decodable structured value: `{input}`")]
    ArgumentDecode { input: String },
    #[error("error from tool '{tool}': {message}")]
    ToolExecution { tool: String, message: String },
    #[error("model reply is not parsable for next tool use: `{generated}`")]
    Unparsable { generated: String },
}
