use once_cell::sync::OnceCell;
use serde_json::Value;

use super::extraction::extract_structured_value;

/// Desired shape of a task's final answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// A unit of work handed to an agent. The caller owns the task; the agent is
/// the only mutator, and only on the success path of a run.
#[derive(Debug, Clone)]
pub struct Task {
    pub name: String,
    pub goal: String,
    pub output_format: OutputFormat,
    raw_output: Option<String>,
    parsed: OnceCell<Option<Value>>,
    completed: bool,
    succeeded: bool,
}

impl Task {
    pub fn new(name: impl Into<String>, goal: impl Into<String>) -> Self {
        Self::with_format(name, goal, OutputFormat::default())
    }

    pub fn with_format(
        name: impl Into<String>,
        goal: impl Into<String>,
        output_format: OutputFormat,
    ) -> Self {
        Self {
            name: name.into(),
            goal: goal.into(),
            output_format,
            raw_output: None,
            parsed: OnceCell::new(),
            completed: false,
            succeeded: false,
        }
    }

    pub fn raw_output(&self) -> Option<&str> {
        self.raw_output.as_deref()
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Structured value recovered from the raw output, computed once and
    /// cached. `None` until the task succeeds, and `None` when the raw output
    /// holds no recoverable structure.
    pub fn parsed_output(&self) -> Option<&Value> {
        let raw = self.raw_output.as_deref()?;
        self.parsed
            .get_or_init(|| extract_structured_value(raw))
            .as_ref()
    }

    /// Format-aware accessor: `Text` tasks yield the raw output as a string
    /// value, `Json` tasks yield the parsed structure.
    pub fn output(&self) -> Option<Value> {
        match self.output_format {
            OutputFormat::Text => self.raw_output.clone().map(Value::String),
            OutputFormat::Json => self.parsed_output().cloned(),
        }
    }

    /// Success-path terminal transition. The raw output is set exactly once;
    /// a second call is a no-op.
    pub(crate) fn complete(&mut self, raw_output: String) {
        if self.raw_output.is_some() {
            return;
        }
        self.raw_output = Some(raw_output);
        self.completed = true;
        self.succeeded = true;
    }
}
