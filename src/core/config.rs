//! Pipeline configuration from YAML

use crate::core::pipeline::{ConfigurationError, Pipeline};
use crate::core::stage::Stage;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level pipeline configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline name
    pub name: String,

    /// Optional pipeline description
    #[serde(default)]
    pub description: Option<String>,

    /// Stages in execution order
    pub stages: Vec<StageConfig>,
}

/// Stage configuration as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    /// Unique stage name
    pub name: String,

    /// Instruction template, may reference earlier output keys as `{key}`
    pub instruction: String,

    /// Context key the stage output is stored under (optional; the terminal
    /// stage typically has none)
    #[serde(default)]
    pub output_key: Option<String>,
}

impl PipelineConfig {
    /// Load pipeline configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse pipeline configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration by assembling it
    pub fn validate(&self) -> Result<()> {
        self.to_pipeline()?;
        Ok(())
    }

    /// Convert config to a Pipeline domain model
    pub fn to_pipeline(&self) -> Result<Pipeline, ConfigurationError> {
        let stages = self
            .stages
            .iter()
            .map(|stage_config| {
                let stage = Stage::new(&stage_config.name, &stage_config.instruction);
                match &stage_config.output_key {
                    Some(key) => stage.with_output_key(key),
                    None => stage,
                }
            })
            .collect();

        Pipeline::build(&self.name, stages)
    }
}
