//! Shared helpers for scenario tests

use async_trait::async_trait;
use seqpipe::agent::{ModelClient, ModelError, ModelRequest, ModelResponse};
use seqpipe::core::{Pipeline, SessionIds, Stage};
use seqpipe::execution::{
    Event, EventStream, ExecutionError, ExecutionService, InMemorySessionService, Message,
    PipelineExecutor, RunOutcome, StageRunner,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Mock model that replays predefined responses
pub struct MockModel {
    responses: Arc<Vec<String>>,
    index: Arc<AtomicUsize>,
}

impl MockModel {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(responses),
            index: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl ModelClient for MockModel {
    async fn generate(&self, _request: &ModelRequest) -> Result<ModelResponse, ModelError> {
        let idx = self.index.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(idx) {
            Some(text) => Ok(ModelResponse::new(text.clone())),
            None => Err(ModelError::Internal(format!(
                "MockModel: no response available for request {}",
                idx + 1
            ))),
        }
    }
}

/// Execution service replaying a scripted event stream.
///
/// The channel capacity is 1, so items are handed over roughly as the
/// consumer pulls them; `delivered()` counts how many items the channel
/// accepted (consumed plus at most one buffered). Once the consumer drops
/// the stream, remaining items are never delivered.
pub struct ScriptedService {
    events: Mutex<Vec<Result<Event, ExecutionError>>>,
    delivered: Arc<AtomicUsize>,
}

impl ScriptedService {
    pub fn new(events: Vec<Result<Event, ExecutionError>>) -> Self {
        Self {
            events: Mutex::new(events),
            delivered: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Counter handle surviving the move into an executor
    pub fn delivered_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.delivered)
    }
}

#[async_trait]
impl ExecutionService for ScriptedService {
    async fn create_session(&self, _ids: &SessionIds) -> Result<(), ExecutionError> {
        Ok(())
    }

    async fn run(
        &self,
        _pipeline: &Pipeline,
        _ids: &SessionIds,
        _message: Message,
    ) -> Result<EventStream, ExecutionError> {
        let events: Vec<_> = self.events.lock().unwrap().drain(..).collect();
        let delivered = Arc::clone(&self.delivered);

        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(async move {
            for event in events {
                if tx.send(event).await.is_err() {
                    // Consumer dropped the stream
                    return;
                }
                delivered.fetch_add(1, Ordering::SeqCst);
            }
        });

        Ok(rx)
    }
}

/// The validate → process → report pipeline used across scenarios
pub fn science_pipeline() -> Pipeline {
    Pipeline::build(
        "DataPipeline",
        vec![
            Stage::new(
                "ValidateInput",
                "Validate the input is a question about science (must).",
            )
            .with_output_key("validation_status"),
            Stage::new(
                "ProcessData",
                "Process data if {validation_status} is 'valid'.",
            )
            .with_output_key("result"),
            Stage::new("ReportResult", "Report the result from {result}."),
        ],
    )
    .unwrap()
}

/// Session identifiers with a per-test session id
pub fn ids(session: &str) -> SessionIds {
    SessionIds::new("DataPipelineApp", session, "user1")
}

/// Run a pipeline end-to-end with a mock model behind the real stage runner
pub async fn run_pipeline_with_mock(
    pipeline: &Pipeline,
    question: &str,
    ids: &SessionIds,
    responses: Vec<String>,
) -> Result<RunOutcome, ExecutionError> {
    let runner = StageRunner::new(
        MockModel::new(responses),
        Arc::new(InMemorySessionService::new()),
    );
    PipelineExecutor::new(runner).run(pipeline, question, ids).await
}

/// Unique temp folder for sink tests
pub fn temp_output_folder() -> PathBuf {
    std::env::temp_dir().join(format!("seqpipe-test-{}", Uuid::new_v4()))
}
