mod errors;
mod models;
mod parser;
mod prompt;
mod runner;


pub use errors::{AgentError, LoopError};
pub use models::{AgentEvent, AgentOptions};
pub use prompt::PROMPT_TEMPLATE;
pub use runner::Agent;
