pub mod conversation;
pub mod extraction;
pub mod task;
pub mod types;

pub use conversation::Conversation;
pub use extraction::extract_structured_value;
pub use task::{OutputFormat, Task};
pub use types::{ChatMessage, MessageRole};
