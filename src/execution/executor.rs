//! Pipeline executor - consumes the event stream and extracts the result

use crate::core::{Pipeline, SessionIds};
use crate::execution::{ExecutionError, ExecutionService, Message};
use tracing::{debug, info, warn};

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The terminal stage emitted a final event; its first text payload
    Completed(String),

    /// The stream ended without a final event from the terminal stage.
    /// A normal negative outcome, not an error.
    Exhausted,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }

    /// The result text, if the run completed
    pub fn text(&self) -> Option<&str> {
        match self {
            RunOutcome::Completed(text) => Some(text),
            RunOutcome::Exhausted => None,
        }
    }
}

/// Drives one pipeline run against an execution service.
///
/// Each invocation is one-shot; nothing is retried or resumed, and there is
/// no timeout. A stalled collaborator stream stalls the run.
pub struct PipelineExecutor<S> {
    service: S,
}

impl<S: ExecutionService> PipelineExecutor<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Run the pipeline for one question.
    ///
    /// Opens a session, submits the question, then consumes the service's
    /// event stream in a single pass. The first final event authored by the
    /// terminal stage wins: its first text payload is returned and the rest
    /// of the stream is abandoned, never observed.
    pub async fn run(
        &self,
        pipeline: &Pipeline,
        question: &str,
        ids: &SessionIds,
    ) -> Result<RunOutcome, ExecutionError> {
        self.service.create_session(ids).await?;
        debug!(session = %ids.session_id, "session ready");

        let mut events = self
            .service
            .run(pipeline, ids, Message::user(question))
            .await?;

        let terminal = pipeline.terminal_stage().name.clone();
        info!(pipeline = %pipeline.name, terminal = %terminal, "streaming events");

        while let Some(item) = events.recv().await {
            let event = item?;
            debug!(author = %event.author, is_final = event.is_final, "event received");

            if event.is_final && event.author == terminal {
                return match event.content.into_first_text() {
                    Some(text) => {
                        info!("terminal stage produced a final result");
                        Ok(RunOutcome::Completed(text))
                    }
                    None => {
                        warn!("terminal final event carried no text payload");
                        Ok(RunOutcome::Exhausted)
                    }
                };
            }
        }

        warn!(pipeline = %pipeline.name, "event stream ended without a terminal result");
        Ok(RunOutcome::Exhausted)
    }
}
