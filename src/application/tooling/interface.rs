use async_trait::async_trait;
use serde_json::Value;

use super::error::ToolInvokeError;

/// One declared argument of a tool, rendered into the calling instructions
/// the model sees. The tool declares its own parameters; argument validation
/// stays the tool's responsibility.
#[derive(Debug, Clone)]
pub struct ToolParam {
    pub name: String,
    pub kind: String,
}

impl ToolParam {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// A named unit of external action the model may invoke.
///
/// `name` must be unique within a registry. `run` receives whatever argument
/// object could be recovered from the model's reply (`Value::Null` when
/// nothing decoded) and returns any JSON-serializable result.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn parameters(&self) -> Vec<ToolParam>;

    /// Terminal tools end the run successfully; at most one per registry.
    fn is_terminal(&self) -> bool {
        false
    }

    async fn run(&self, args: Value) -> Result<Value, ToolInvokeError>;

    /// Calling convention injected verbatim into the prompt.
    fn usage(&self) -> String {
        let params = self.parameters();
        if params.is_empty() {
            return "Parameters to include in Action Input dictionary: None".to_string();
        }
        let mut out = String::from("Parameters to include in Action Input dictionary:\n");
        for param in params {
            out.push_str(&format!("\t{}: {}\n", param.name, param.kind));
        }
        out.trim_end().to_string()
    }
}
