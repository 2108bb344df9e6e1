//! Pipeline definition and execution.
//!
//! This module provides:
//! - The immutable, ordered [`Pipeline`] definition
//! - A validating [`PipelineBuilder`]
//! - The sequential, fail-fast [`PipelineRunner`]
//! - The [`RunState`] machine a run moves through

mod builder;
mod definition;
mod runner;
mod state;

pub use builder::PipelineBuilder;
pub use definition::{Pipeline, DEFAULT_START_NOTICE, DEFAULT_SUCCESS_NOTICE};
pub use runner::{PipelineReport, PipelineRunner};
pub use state::RunState;
