//! Test: full run from question to persisted JSON

use crate::helpers::*;
use seqpipe::core::{Pipeline, Stage};
use seqpipe::execution::RunOutcome;
use seqpipe::sink::{self, ResultValue};
use serde_json::json;

/// The canonical three-stage run: the report stage's text comes back
/// verbatim and persists as a wrapped JSON record.
#[tokio::test]
async fn test_science_question_end_to_end() {
    let pipeline = science_pipeline();
    let report = "CO2 absorbs infrared radiation, trapping heat and warming the planet.";

    let responses = vec![
        "valid".to_string(),
        "CO2 traps outgoing heat in the atmosphere.".to_string(),
        report.to_string(),
    ];

    let outcome = run_pipeline_with_mock(
        &pipeline,
        "What is the impact of CO2 on global warming?",
        &ids("e2e-science"),
        responses,
    )
    .await
    .unwrap();

    assert_eq!(outcome, RunOutcome::Completed(report.to_string()));

    let folder = temp_output_folder();
    let path = sink::persist(
        &ResultValue::Text(report.to_string()),
        &folder,
        "result.json",
    )
    .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed, json!({"content": report}));

    std::fs::remove_dir_all(&folder).ok();
}

/// A single-stage pipeline is its own terminal stage
#[tokio::test]
async fn test_single_stage_pipeline() {
    let pipeline = Pipeline::build(
        "Direct",
        vec![Stage::new("Answer", "Answer the question briefly.")],
    )
    .unwrap();

    let outcome = run_pipeline_with_mock(
        &pipeline,
        "What color is the sky?",
        &ids("e2e-single"),
        vec!["Blue.".to_string()],
    )
    .await
    .unwrap();

    assert_eq!(outcome.text(), Some("Blue."));
}

/// Structured model output persists without an extra wrapping layer
#[tokio::test]
async fn test_structured_result_persists_unwrapped() {
    let folder = temp_output_folder();
    let structured = json!({"question_result": "valid", "confidence": 0.9});

    let path = sink::persist(
        &ResultValue::Structured(structured.clone()),
        &folder,
        "result.json",
    )
    .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed, structured);

    std::fs::remove_dir_all(&folder).ok();
}
