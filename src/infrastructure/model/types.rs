//! Model boundary types

use thiserror::Error;

/// Errors a model backend may surface. These are outside the loop's
/// authority and propagate out of a run unchanged.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("provider '{provider}' request failed: {message}")]
    Backend { provider: String, message: String },
    #[error("provider '{provider}' returned an empty response")]
    EmptyResponse { provider: String },
}

impl ModelError {
    pub fn backend(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn empty_response(provider: impl Into<String>) -> Self {
        Self::EmptyResponse {
            provider: provider.into(),
        }
    }
}
