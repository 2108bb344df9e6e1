//! Core domain model types for buildflow.
//!
//! This module contains the fundamental types used throughout the crate:
//! - Stage status enum
//! - Per-stage outcome records
//! - Build lifecycle events

mod event;
mod outcome;
mod status;

pub use event::BuildEvent;
pub use outcome::StageOutcome;
pub use status::StageStatus;
