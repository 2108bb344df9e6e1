//! # Buildflow
//!
//! A sequential, fail-fast build pipeline orchestrator.
//!
//! Buildflow turns the web source tree into a deployable output tree by
//! running a fixed list of external tools one after another:
//!
//! - **Stages**: a progress notice, one external command, an optional skip rule
//! - **Fail-fast execution**: the first failing command halts the run
//! - **Live output**: tools inherit the console, so their output streams as
//!   it is produced
//! - **Explicit configuration**: the environment is read once, up front
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use buildflow::prelude::*;
//! use std::sync::Arc;
//!
//! let config = BuildConfig::from_env();
//! let runner = PipelineRunner::new(web_pipeline(&config)?, Arc::new(ProcessInvoker::new()))
//!     .with_event_sink(Arc::new(ConsoleEventSink::stdout()));
//!
//! runner.run().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod invoker;
pub mod observability;
pub mod pipeline;
pub mod stages;
pub mod testing;
pub mod utils;
pub mod web;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::BuildConfig;
    pub use crate::core::{BuildEvent, StageOutcome, StageStatus};
    pub use crate::errors::{
        BuildflowError, InvocationFailure, InvokeError, PipelineValidationError,
        StageInvocationError,
    };
    pub use crate::events::{CollectingEventSink, ConsoleEventSink, EventSink, NoOpEventSink};
    pub use crate::invoker::{CommandSpec, Invocation, Invoker, ProcessInvoker};
    pub use crate::pipeline::{Pipeline, PipelineBuilder, PipelineReport, PipelineRunner, RunState};
    pub use crate::stages::{SkipRule, Stage};
    pub use crate::web::web_pipeline;
}
