//! Core domain models: stages, pipelines, session contexts

pub mod config;
pub mod context;
pub mod pipeline;
pub mod stage;

pub use config::PipelineConfig;
pub use context::{SessionContext, SessionIds};
pub use pipeline::{ConfigurationError, Pipeline};
pub use stage::Stage;
