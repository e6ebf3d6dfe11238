//! Result sink - persists run results as JSON

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Default output folder
pub const DEFAULT_FOLDER: &str = "output";

/// Default output filename
pub const DEFAULT_FILENAME: &str = "result.json";

/// Errors raised while persisting a result
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A run result: plain text or the model's structured output
#[derive(Debug, Clone, PartialEq)]
pub enum ResultValue {
    Text(String),
    Structured(Value),
}

impl From<String> for ResultValue {
    fn from(text: String) -> Self {
        ResultValue::Text(text)
    }
}

impl From<&str> for ResultValue {
    fn from(text: &str) -> Self {
        ResultValue::Text(text.to_string())
    }
}

impl From<Value> for ResultValue {
    fn from(value: Value) -> Self {
        ResultValue::Structured(value)
    }
}

impl ResultValue {
    /// The JSON payload written to disk. Plain text is wrapped in a
    /// single-field record; structured values are written verbatim.
    fn to_json(&self) -> Value {
        match self {
            ResultValue::Text(text) => json!({ "content": text }),
            ResultValue::Structured(value) => value.clone(),
        }
    }
}

/// Persist a result as pretty-printed UTF-8 JSON.
///
/// Creates the folder if needed (idempotent) and overwrites any existing
/// file at the path; there are no merge or append semantics. Non-ASCII
/// characters are written literally, not escaped. Filesystem failures
/// propagate; nothing is retried.
pub fn persist(
    result: &ResultValue,
    folder: impl AsRef<Path>,
    filename: &str,
) -> Result<PathBuf, SinkError> {
    let folder = folder.as_ref();
    fs::create_dir_all(folder)?;

    let path = folder.join(filename);
    let payload = serde_json::to_string_pretty(&result.to_json())?;
    fs::write(&path, payload)?;

    info!(path = %path.display(), "result persisted");
    Ok(path)
}
