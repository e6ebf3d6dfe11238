//! Stage domain model

use regex::Regex;
use std::collections::HashMap;

/// A single stage in a pipeline
///
/// Immutable once defined. The instruction may reference earlier stages'
/// outputs as `{output_key}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// Stage name, unique within its pipeline
    pub name: String,

    /// Instruction template sent to the model
    pub instruction: String,

    /// Session context key this stage's output is stored under
    pub output_key: Option<String>,
}

impl Stage {
    /// Create a stage with no output key
    pub fn new(name: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
            output_key: None,
        }
    }

    /// Store this stage's output under the given context key
    pub fn with_output_key(mut self, key: impl Into<String>) -> Self {
        self.output_key = Some(key.into());
        self
    }

    /// Render the instruction against bindings from earlier stages.
    ///
    /// References are resolved by simple `{key}` substitution. Unresolved
    /// placeholders are left in place and reach the model verbatim; they are
    /// logged here, never treated as errors.
    pub fn render_instruction(&self, bindings: &HashMap<String, String>) -> String {
        let mut instruction = self.instruction.clone();

        for (key, value) in bindings {
            let placeholder = format!("{{{}}}", key);
            instruction = instruction.replace(&placeholder, value);
        }

        if let Ok(unresolved) = Regex::new(r"\{[A-Za-z_][A-Za-z0-9_]*\}") {
            if let Some(found) = unresolved.find(&instruction) {
                tracing::warn!(
                    stage = %self.name,
                    placeholder = found.as_str(),
                    "instruction still references an unbound output key"
                );
            }
        }

        instruction
    }
}
