//! Model response types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for model operations
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("API error: {0}")]
    Api(String),

    #[error("missing credentials: {0}")]
    Credentials(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Response from the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    /// The response text
    pub text: String,

    /// Token usage information (if available)
    pub usage: Option<TokenUsage>,
}

impl ModelResponse {
    /// Create a response with no usage information
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
        }
    }
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
