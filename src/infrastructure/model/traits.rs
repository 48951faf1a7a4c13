//! Model traits

use async_trait::async_trait;

use super::types::ModelError;
use crate::domain::types::ChatMessage;

/// Boundary to a text-generation backend.
///
/// Implementations must treat `stop` as hard truncation markers: generation
/// halts before any of the given sequences would be emitted. The loop relies
/// on this to keep the model from fabricating its own observations.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn generate(
        &self,
        messages: &[ChatMessage],
        stop: &[String],
    ) -> Result<String, ModelError>;
}
