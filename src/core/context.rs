//! Session context - per-run stage output bindings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifiers scoping one session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionIds {
    /// Application name
    pub app_name: String,

    /// Session identifier
    pub session_id: String,

    /// User identifier
    pub user_id: String,
}

impl SessionIds {
    pub fn new(
        app_name: impl Into<String>,
        session_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            session_id: session_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// Mutable store of stage outputs for one run
///
/// Each completed stage writes its output here under its declared output
/// key, where later stages' instruction templates can read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// Identifiers this context is bound to
    pub ids: SessionIds,

    /// Stage outputs keyed by output_key
    bindings: HashMap<String, String>,

    /// When the session was created
    pub created_at: DateTime<Utc>,
}

impl SessionContext {
    /// Create an empty context bound to the given identifiers
    pub fn new(ids: SessionIds) -> Self {
        Self {
            ids,
            bindings: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Bind a stage output under its output key
    pub fn bind(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.bindings.insert(key.into(), value.into());
    }

    /// Read a bound output
    pub fn get(&self, key: &str) -> Option<&String> {
        self.bindings.get(key)
    }

    /// All bindings, for instruction rendering
    pub fn bindings(&self) -> &HashMap<String, String> {
        &self.bindings
    }
}
