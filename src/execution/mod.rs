//! Pipeline execution: the service boundary, the stage runner, and the
//! event loop

pub mod events;
pub mod executor;
pub mod runner;
pub mod session;

use crate::agent::ModelError;
use crate::core::{Pipeline, SessionIds};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

pub use events::{Content, Event, Message, Part};
pub use executor::{PipelineExecutor, RunOutcome};
pub use runner::StageRunner;
pub use session::{InMemorySessionService, SessionService};

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("model execution failed: {0}")]
    Model(#[from] ModelError),

    #[error("session error: {0}")]
    Session(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Ordered, single-pass, non-restartable stream of run events.
///
/// Dropping the receiver abandons the remainder of the stream.
pub type EventStream = mpsc::Receiver<Result<Event, ExecutionError>>;

/// Boundary to the agent execution service that drives the model.
///
/// The service owns session creation and stage sequencing; this crate only
/// consumes the resulting event stream.
#[async_trait]
pub trait ExecutionService: Send + Sync {
    /// Create (or reuse) the session for the given identifiers
    async fn create_session(&self, ids: &SessionIds) -> Result<(), ExecutionError>;

    /// Run a pipeline against a session, yielding an ordered stream of
    /// events. The collaborator executes each stage of the pipeline in
    /// order and emits at least one final event per stage.
    async fn run(
        &self,
        pipeline: &Pipeline,
        ids: &SessionIds,
        message: Message,
    ) -> Result<EventStream, ExecutionError>;
}
