//! Session storage for pipeline runs

use crate::core::{SessionContext, SessionIds};
use crate::execution::ExecutionError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Trait for session storage backends
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Get or create the session for the given identifiers.
    ///
    /// Reusing identifiers returns the existing context together with its
    /// bindings; callers wanting isolation must supply fresh session ids.
    async fn create_session(&self, ids: &SessionIds) -> Result<SessionContext, ExecutionError>;

    /// Look up an existing session
    async fn session(&self, ids: &SessionIds) -> Option<SessionContext>;

    /// Bind a stage output into an existing session
    async fn bind_output(
        &self,
        ids: &SessionIds,
        key: &str,
        value: &str,
    ) -> Result<(), ExecutionError>;
}

/// In-memory session store
pub struct InMemorySessionService {
    sessions: RwLock<HashMap<SessionIds, SessionContext>>,
}

impl InMemorySessionService {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionService for InMemorySessionService {
    async fn create_session(&self, ids: &SessionIds) -> Result<SessionContext, ExecutionError> {
        let mut sessions = self.sessions.write().await;
        let context = sessions
            .entry(ids.clone())
            .or_insert_with(|| SessionContext::new(ids.clone()));
        Ok(context.clone())
    }

    async fn session(&self, ids: &SessionIds) -> Option<SessionContext> {
        self.sessions.read().await.get(ids).cloned()
    }

    async fn bind_output(
        &self,
        ids: &SessionIds,
        key: &str,
        value: &str,
    ) -> Result<(), ExecutionError> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(ids) {
            Some(context) => {
                context.bind(key, value);
                Ok(())
            }
            None => Err(ExecutionError::Session(format!(
                "no session for id '{}'",
                ids.session_id
            ))),
        }
    }
}
