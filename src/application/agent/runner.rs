use std::sync::Arc;

use async_stream::try_stream;
use futures::{Stream, StreamExt};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::errors::{AgentError, LoopError};
use super::models::{AgentEvent, AgentOptions};
use super::parser::{ParsedReply, parse_reply};
use super::prompt::{
    self, NEXT_THOUGHT_TOKEN, OBSERVATION_TOKEN, PREVIOUS_RESPONSES_SLOT,
};
use crate::application::tooling::{FINAL_ANSWER_TOOL_NAME, Tool, ToolRegistry};
use crate::domain::conversation::Conversation;
use crate::domain::extraction::extract_structured_value;
use crate::domain::task::Task;
use crate::domain::types::ChatMessage;
use crate::infrastructure::model::ModelProvider;

const TOOL_EVAL_PLACEHOLDER: &str = "Tool evaluation mode is on. No tool will be run.";

/// The decision loop: renders the prompt, asks the model for the next
/// action, dispatches the chosen tool, and feeds the result back as an
/// observation until the terminal tool fires or the loop budget runs out.
///
/// Tool and model capabilities are shared read-only references; all
/// transcripts, audit lists, and the error log are owned by the agent and
/// written only by the single loop in flight.
pub struct Agent {
    name: String,
    model: Arc<dyn ModelProvider>,
    tools: ToolRegistry,
    prompt_template: String,
    max_loops: usize,
    tool_eval_mode: bool,
    use_conversation: bool,
    conversation: Conversation,
    ai_responses: Vec<String>,
    errors_encountered: Vec<LoopError>,
    tools_selected: Vec<String>,
    tools_used: Vec<String>,
}

impl Agent {
    pub fn new(model: Arc<dyn ModelProvider>, tools: Vec<Arc<dyn Tool>>) -> Self {
        Self::with_options(model, tools, AgentOptions::default())
    }

    pub fn with_options(
        model: Arc<dyn ModelProvider>,
        tools: Vec<Arc<dyn Tool>>,
        options: AgentOptions,
    ) -> Self {
        Self {
            name: options.name,
            model,
            tools: ToolRegistry::new(tools),
            prompt_template: options.prompt_template,
            max_loops: options.max_loops.max(1),
            tool_eval_mode: options.tool_eval_mode,
            use_conversation: options.use_conversation,
            conversation: Conversation::new(),
            ai_responses: Vec::new(),
            errors_encountered: Vec::new(),
            tools_selected: Vec::new(),
            tools_used: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Raw per-iteration texts accumulated across runs, in order.
    pub fn ai_responses(&self) -> &[String] {
        &self.ai_responses
    }

    /// Recoverable errors encountered so far, in order.
    pub fn errors_encountered(&self) -> &[LoopError] {
        &self.errors_encountered
    }

    /// Every tool name the model selected, valid or not.
    pub fn tools_selected(&self) -> &[String] {
        &self.tools_selected
    }

    /// Tools that actually ran without failing.
    pub fn tools_used(&self) -> &[String] {
        &self.tools_used
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Eager mode: drive the loop to termination and return the full event
    /// sequence. Identical to draining [`run_stream`](Self::run_stream).
    pub async fn run(&mut self, task: &mut Task) -> Result<Vec<AgentEvent>, AgentError> {
        let mut events = Vec::new();
        {
            let mut stream = std::pin::pin!(self.run_stream(task));
            while let Some(event) = stream.next().await {
                events.push(event?);
            }
        }
        Ok(events)
    }

    /// Lazy mode: yield each lifecycle event as it occurs. A model backend
    /// failure ends the stream with an error; everything else is recoverable
    /// and the loop keeps going.
    pub fn run_stream<'a>(
        &'a mut self,
        task: &'a mut Task,
    ) -> impl Stream<Item = Result<AgentEvent, AgentError>> + 'a {
        try_stream! {
            info!(
                agent = %self.name,
                task = %task.name,
                max_loops = self.max_loops,
                "Agent run started"
            );
            let base_prompt = prompt::render_base(
                &self.prompt_template,
                &self.tools.describe_all(),
                &self.tools.quoted_names(),
                &task.goal,
            );
            let stop = prompt::stop_sequences();
            let mut transcript = self.ai_responses.clone();
            let mut num_loops = 0;
            let mut reached_final = false;

            'iterations: while num_loops < self.max_loops {
                num_loops += 1;
                let curr_prompt = base_prompt
                    .replace(PREVIOUS_RESPONSES_SLOT, transcript.join("\n").trim());

                let mut messages: Vec<ChatMessage> = Vec::new();
                if self.use_conversation {
                    messages.extend(self.conversation.messages().iter().cloned());
                }
                messages.push(ChatMessage::user(curr_prompt));

                debug!(loop_index = num_loops, "Submitting turn to model provider");
                let generated = self.model.generate(&messages, &stop).await?;

                let (tool_name, input_text, reply_unparsable) =
                    match parse_reply(&generated, &self.tools.quoted_names()) {
                        ParsedReply::Action { tool, input } => (tool, input, false),
                        ParsedReply::ImplicitFinal { payload } => {
                            (FINAL_ANSWER_TOOL_NAME.to_string(), payload, false)
                        }
                        ParsedReply::Unparsable { instruction } => {
                            warn!(loop_index = num_loops, "Model reply is unparsable");
                            self.errors_encountered.push(LoopError::Unparsable {
                                generated: generated.clone(),
                            });
                            (instruction.clone(), instruction, true)
                        }
                    };

                let tool_input = match extract_structured_value(&input_text) {
                    Some(value) => value,
                    None => {
                        if !reply_unparsable {
                            self.errors_encountered.push(LoopError::ArgumentDecode {
                                input: input_text.clone(),
                            });
                        }
                        Value::Null
                    }
                };

                self.tools_selected.push(tool_name.clone());
                yield AgentEvent::NextAgentAction {
                    loop_index: num_loops,
                    tool: tool_name.clone(),
                    tool_input: tool_input.clone(),
                    generated: generated.clone(),
                };

                let remaining = self.max_loops - num_loops;
                let Some(tool) = self.tools.get(&tool_name) else {
                    warn!(tool = %tool_name, "Unknown tool requested by model");
                    self.errors_encountered.push(LoopError::UnknownTool {
                        tool: tool_name.clone(),
                        valid: self.tools.quoted_names(),
                    });
                    yield AgentEvent::Error {
                        message: format!("Unknown tool: {tool_name}"),
                    };
                    // Corrective observation so the model can self-correct on
                    // the next iteration.
                    let observation = format!(
                        "Unknown tool. State a tool name from the list: {}. Use \"{FINAL_ANSWER_TOOL_NAME}\" to end the task with the final answer.",
                        self.tools.quoted_names()
                    );
                    let entry = format!(
                        "{generated}\n{OBSERVATION_TOKEN} {observation}\n{NEXT_THOUGHT_TOKEN} ({remaining} thoughts left)"
                    );
                    self.ai_responses.push(entry.trim().to_string());
                    transcript.push(entry);
                    continue 'iterations;
                };

                yield AgentEvent::ToolSelected {
                    tool: tool_name.clone(),
                };

                let mut failed = false;
                let result_text = if self.tool_eval_mode {
                    TOOL_EVAL_PLACEHOLDER.to_string()
                } else {
                    debug!(tool = %tool_name, "Dispatching tool");
                    match tool.run(tool_input.clone()).await {
                        Ok(value) => value_to_text(&value),
                        Err(err) => {
                            warn!(tool = %tool_name, error = %err, "Tool execution failed");
                            self.errors_encountered.push(LoopError::ToolExecution {
                                tool: tool_name.clone(),
                                message: err.to_string(),
                            });
                            failed = true;
                            format!("Error from tool: {err}")
                        }
                    }
                };

                if failed {
                    yield AgentEvent::ToolError {
                        message: result_text.clone(),
                    };
                } else {
                    self.tools_used.push(tool_name.clone());
                    yield AgentEvent::ToolRun {
                        tool: tool_name.clone(),
                        tool_input: tool_input.clone(),
                        tool_result: result_text.clone(),
                    };
                    yield AgentEvent::ToolResult {
                        tool: tool_name.clone(),
                        result: result_text.clone(),
                    };
                }

                let entry = format!(
                    "{generated}\n{OBSERVATION_TOKEN} {result_text}\n{NEXT_THOUGHT_TOKEN} ({remaining} thoughts left)"
                );
                self.ai_responses.push(entry.trim().to_string());
                transcript.push(entry);

                if !failed && tool.is_terminal() {
                    reached_final = true;
                    task.complete(result_text.clone());
                    if self.use_conversation {
                        let final_prompt = base_prompt
                            .replace(PREVIOUS_RESPONSES_SLOT, transcript.join("\n").trim());
                        self.conversation.push(ChatMessage::assistant(final_prompt));
                    }
                    info!(agent = %self.name, loops = num_loops, "Agent completed task");
                    yield AgentEvent::AgentCompleted {
                        final_answer: result_text,
                    };
                    break 'iterations;
                }
            }

            if !reached_final {
                warn!(max_loops = self.max_loops, "Loop budget exhausted without completion");
                yield AgentEvent::MaxLoopsReached {
                    message: format!("Max loops ({}) reached.", self.max_loops),
                };
            }
        }
    }
}

/// Observation text for a tool result: strings pass through verbatim, any
/// other value is serialized to compact JSON.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
