//! Model client for executing stage instructions

pub mod gemini;
pub mod response;

use async_trait::async_trait;
pub use gemini::GeminiClient;
pub use response::{ModelError, ModelResponse, TokenUsage};

/// One model call: a rendered stage instruction plus the user's input
#[derive(Debug, Clone)]
pub struct ModelRequest {
    /// Rendered stage instruction, sent as system text
    pub instruction: String,

    /// The user's question
    pub input: String,
}

impl ModelRequest {
    pub fn new(instruction: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            input: input.into(),
        }
    }
}

/// Trait for model execution - allows for different implementations
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Execute one request and return the model's text
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, ModelError>;
}
