use thiserror::Error;

/// What a tool run may raise. The decision loop catches every variant and
/// folds it back into the transcript as an observation; tool failures never
/// abort a run.
#[derive(Debug, Error)]
pub enum ToolInvokeError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Failed(String),
}

impl ToolInvokeError {
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}
