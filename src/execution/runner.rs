//! Stage runner - drives pipeline stages against the model in order

use crate::agent::{ModelClient, ModelRequest};
use crate::core::{Pipeline, SessionIds, Stage};
use crate::execution::session::SessionService;
use crate::execution::{Event, EventStream, ExecutionError, ExecutionService, Message};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Capacity of the event channel between the runner task and the consumer
const EVENT_BUFFER: usize = 32;

/// Built-in execution service: runs stages front-to-back against a model.
///
/// For each stage it renders the instruction against the session's current
/// bindings, calls the model, binds the response under the stage's output
/// key, and emits one final event authored by the stage. A model failure
/// ends the stream with a single error item; nothing is retried.
pub struct StageRunner<M> {
    model: Arc<M>,
    sessions: Arc<dyn SessionService>,
}

impl<M: ModelClient + 'static> StageRunner<M> {
    pub fn new(model: M, sessions: Arc<dyn SessionService>) -> Self {
        Self {
            model: Arc::new(model),
            sessions,
        }
    }

    async fn execute_stages(
        model: Arc<M>,
        sessions: Arc<dyn SessionService>,
        stages: Vec<Stage>,
        ids: SessionIds,
        input: String,
        tx: mpsc::Sender<Result<Event, ExecutionError>>,
    ) {
        let run_id = Uuid::new_v4();
        info!(%run_id, stages = stages.len(), "pipeline run started");

        for stage in &stages {
            let bindings = match sessions.session(&ids).await {
                Some(context) => context.bindings().clone(),
                None => HashMap::new(),
            };

            let instruction = stage.render_instruction(&bindings);
            debug!(%run_id, stage = %stage.name, "executing stage");

            let request = ModelRequest::new(instruction, input.clone());
            match model.generate(&request).await {
                Ok(response) => {
                    if let Some(key) = &stage.output_key {
                        if let Err(e) = sessions.bind_output(&ids, key, &response.text).await {
                            let _ = tx.send(Err(e)).await;
                            return;
                        }
                    }

                    let event = Event::final_text(&stage.name, response.text);
                    if tx.send(Ok(event)).await.is_err() {
                        // Receiver dropped: the consumer abandoned the stream
                        debug!(%run_id, stage = %stage.name, "event stream abandoned");
                        return;
                    }
                }
                Err(e) => {
                    error!(%run_id, stage = %stage.name, error = %e, "stage failed");
                    let _ = tx.send(Err(e.into())).await;
                    return;
                }
            }
        }

        info!(%run_id, "all stages emitted");
    }
}

#[async_trait]
impl<M: ModelClient + 'static> ExecutionService for StageRunner<M> {
    async fn create_session(&self, ids: &SessionIds) -> Result<(), ExecutionError> {
        self.sessions.create_session(ids).await.map(|_| ())
    }

    async fn run(
        &self,
        pipeline: &Pipeline,
        ids: &SessionIds,
        message: Message,
    ) -> Result<EventStream, ExecutionError> {
        self.sessions.create_session(ids).await?;

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let input = message
            .content
            .first_text()
            .unwrap_or_default()
            .to_string();

        tokio::spawn(Self::execute_stages(
            Arc::clone(&self.model),
            Arc::clone(&self.sessions),
            pipeline.stages().to_vec(),
            ids.clone(),
            input,
            tx,
        ));

        Ok(rx)
    }
}
