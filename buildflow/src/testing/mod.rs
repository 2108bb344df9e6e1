//! Testing utilities for buildflow pipelines.
//!
//! This module provides:
//! - A recording invoker that never spawns processes
//! - Assertions over run results and invocation logs

mod assertions;
mod mocks;

pub use assertions::{
    assert_invocation_log, assert_pipeline_succeeded, assert_stage_failed,
};
pub use mocks::RecordingInvoker;
