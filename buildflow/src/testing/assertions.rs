//! Test assertions for pipeline runs.

use crate::errors::{BuildflowError, StageInvocationError};
use crate::pipeline::{PipelineReport, RunState};
use crate::testing::RecordingInvoker;

/// Asserts that the run succeeded and returns its report.
pub fn assert_pipeline_succeeded(
    result: Result<PipelineReport, BuildflowError>,
) -> PipelineReport {
    match result {
        Ok(report) => {
            assert_eq!(
                report.state,
                RunState::Succeeded,
                "Expected a succeeded run, got state {}",
                report.state
            );
            report
        }
        Err(err) => panic!("Expected pipeline success, got error: {err}"),
    }
}

/// Asserts that the run failed at `stage` (1-based `position`).
pub fn assert_stage_failed(
    result: Result<PipelineReport, BuildflowError>,
    stage: &str,
    position: usize,
) -> StageInvocationError {
    match result {
        Err(BuildflowError::StageInvocation(err)) => {
            assert_eq!(err.stage, stage, "Wrong failing stage: {err}");
            assert_eq!(err.position, position, "Wrong failing position: {err}");
            err
        }
        Err(other) => panic!("Expected a stage failure at '{stage}', got: {other}"),
        Ok(report) => panic!(
            "Expected a stage failure at '{stage}', but the run succeeded: {:?}",
            report.invoked_stages()
        ),
    }
}

/// Asserts the exact sequence of command lines the invoker received.
pub fn assert_invocation_log(invoker: &RecordingInvoker, expected: &[&str]) {
    let actual = invoker.command_lines();
    assert_eq!(
        actual, expected,
        "Invocation log mismatch.\n  expected: {expected:#?}\n  actual:   {actual:#?}"
    );
}
