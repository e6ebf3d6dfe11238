//! seqpipe - a sequential multi-stage LLM pipeline runner

pub mod agent;
pub mod cli;
pub mod core;
pub mod execution;
pub mod sink;

// Re-export commonly used types
pub use agent::{GeminiClient, ModelClient, ModelError, ModelRequest, ModelResponse};
pub use crate::core::{
    ConfigurationError, Pipeline, PipelineConfig, SessionContext, SessionIds, Stage,
};
pub use execution::{
    Content, Event, EventStream, ExecutionError, ExecutionService, InMemorySessionService,
    Message, Part, PipelineExecutor, RunOutcome, SessionService, StageRunner,
};
pub use sink::{persist, ResultValue, SinkError};
