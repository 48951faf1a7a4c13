use std::sync::Arc;

use super::final_answer::ReturnFinalAnswerTool;
use super::interface::Tool;

/// Insertion-ordered collection of tools. Registry order is prompt order:
/// the model sees tool descriptions in the order they were registered.
///
/// Construction guarantees exactly one terminal tool: the built-in
/// final-answer tool is appended unless the caller already supplied one.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ToolRegistry {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        let mut registry = Self { tools };
        if !registry.tools.iter().any(|tool| tool.is_terminal()) {
            registry.tools.push(Arc::new(ReturnFinalAnswerTool));
        }
        registry
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|tool| tool.name() == name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.iter().any(|tool| tool.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.iter()
    }

    /// Always at least 1: construction guarantees a terminal tool.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// One line per tool, registry order: name, description, and the tool's
    /// self-described calling convention.
    pub fn describe_all(&self) -> String {
        self.tools
            .iter()
            .map(|tool| {
                format!(
                    "{}: {}. how to run: {}",
                    tool.name(),
                    tool.description(),
                    tool.usage()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `"a", "b", "c"` for prompt injection and corrective error messages.
    pub fn quoted_names(&self) -> String {
        self.tools
            .iter()
            .map(|tool| format!("\"{}\"", tool.name()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
