//! Test: runs that produce no valid result

use crate::helpers::*;
use seqpipe::execution::{Event, ExecutionError, PipelineExecutor, RunOutcome};

/// A stream with no final event from the terminal stage is a normal
/// negative outcome, never an error.
#[tokio::test]
async fn test_stream_without_terminal_final_is_exhausted() {
    let service = ScriptedService::new(vec![
        Ok(Event::final_text("ValidateInput", "invalid")),
        Ok(Event::final_text("ProcessData", "skipped")),
    ]);
    let executor = PipelineExecutor::new(service);

    let outcome = executor
        .run(&science_pipeline(), "not a science question", &ids("no-result"))
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Exhausted);
}

/// An immediately empty stream behaves the same way
#[tokio::test]
async fn test_empty_stream_is_exhausted() {
    let executor = PipelineExecutor::new(ScriptedService::new(vec![]));

    let outcome = executor
        .run(&science_pipeline(), "question", &ids("no-result-empty"))
        .await
        .unwrap();

    assert!(!outcome.is_completed());
}

/// A model failure mid-run aborts the run with an execution error
#[tokio::test]
async fn test_model_failure_aborts_run() {
    // Only one scripted response: the second stage's model call fails
    let result = run_pipeline_with_mock(
        &science_pipeline(),
        "question",
        &ids("no-result-failure"),
        vec!["valid".to_string()],
    )
    .await;

    match result {
        Err(ExecutionError::Model(e)) => {
            assert!(e.to_string().contains("no response available"));
        }
        other => panic!("Expected a model execution error, got {:?}", other),
    }
}

/// An error item in the stream propagates even before the terminal stage
#[tokio::test]
async fn test_stream_error_propagates() {
    let service = ScriptedService::new(vec![
        Ok(Event::final_text("ValidateInput", "valid")),
        Err(ExecutionError::Internal("collaborator crashed".to_string())),
    ]);
    let executor = PipelineExecutor::new(service);

    let result = executor
        .run(&science_pipeline(), "question", &ids("no-result-error"))
        .await;

    assert!(matches!(result, Err(ExecutionError::Internal(_))));
}
