//! Event sinks for build progress.
//!
//! The runner reports every lifecycle transition as a [`BuildEvent`]
//! (`pipeline.started`, `stage.started`, `stage.skipped`, `stage.completed`,
//! `stage.failed`, `pipeline.completed`, `pipeline.failed`). Sinks decide what
//! to do with them: print progress lines, record them, or drop them.
//!
//! [`BuildEvent`]: crate::core::BuildEvent

mod sink;

pub use sink::{CollectingEventSink, ConsoleEventSink, EventSink, NoOpEventSink};
