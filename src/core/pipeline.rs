//! Pipeline domain model

use crate::core::stage::Stage;
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while assembling a pipeline
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("pipeline has no stages")]
    EmptyPipeline,

    #[error("duplicate stage name: {0}")]
    DuplicateStage(String),
}

/// An ordered, fixed sequence of stages executed front-to-back
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Pipeline name
    pub name: String,

    /// Stages in execution order
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Assemble a pipeline from an ordered sequence of stages.
    ///
    /// Stage order is significant and fixed here; there is no dependency
    /// graph, only the given linear order. Instruction templates are NOT
    /// checked against declared output keys; an unresolved reference is a
    /// runtime condition, surfaced only when the model consumes it.
    pub fn build(name: impl Into<String>, stages: Vec<Stage>) -> Result<Self, ConfigurationError> {
        if stages.is_empty() {
            return Err(ConfigurationError::EmptyPipeline);
        }

        let mut seen = HashSet::new();
        for stage in &stages {
            if !seen.insert(stage.name.as_str()) {
                return Err(ConfigurationError::DuplicateStage(stage.name.clone()));
            }
        }

        Ok(Pipeline {
            name: name.into(),
            stages,
        })
    }

    /// Stages in execution order
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Look up a stage by name
    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name == name)
    }

    /// The last stage, whose final event is treated as the run's result
    pub fn terminal_stage(&self) -> &Stage {
        // build() rejects empty stage lists
        self.stages.last().expect("pipeline stages are non-empty")
    }
}
