//! Event sink trait and implementations.

use crate::core::BuildEvent;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::io::Write;
use tracing::{debug, warn};

/// Trait for sinks that receive build events.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emits an event asynchronously.
    ///
    /// Must never fail; write errors are logged and suppressed.
    async fn emit(&self, event: &BuildEvent);
}

/// A no-op event sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: &BuildEvent) {}
}

/// Prints human-readable progress lines.
///
/// Only events carrying a `notice` produce output; those are
/// `pipeline.started`, `stage.started`, `stage.skipped` and
/// `pipeline.completed`. Failures print nothing here: the failing tool's own
/// diagnostics are already on the console.
#[derive(Debug)]
pub struct ConsoleEventSink<W: Write + Send = std::io::Stdout> {
    writer: Mutex<W>,
}

impl ConsoleEventSink<std::io::Stdout> {
    /// Creates a sink printing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl Default for ConsoleEventSink<std::io::Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write + Send> ConsoleEventSink<W> {
    /// Creates a sink printing to the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn print(&self, event: &BuildEvent) {
        debug!(event_type = %event.event_type, data = ?event.data, "Event: {}", event.event_type);

        let Some(notice) = event.notice() else {
            return;
        };

        // Child processes share the console; flush so lines land in order.
        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{notice}").and_then(|()| writer.flush()) {
            warn!(error = %e, "Failed to write progress line");
        }
    }
}

#[async_trait]
impl<W: Write + Send> EventSink for ConsoleEventSink<W> {
    async fn emit(&self, event: &BuildEvent) {
        self.print(event);
    }
}

/// A collecting event sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: parking_lot::RwLock<Vec<BuildEvent>>,
}

impl CollectingEventSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<BuildEvent> {
        self.events.read().clone()
    }

    /// Returns the collected event types, in order.
    #[must_use]
    pub fn event_types(&self) -> Vec<String> {
        self.events
            .read()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Clears all collected events.
    pub fn clear(&self) {
        self.events.write().clear();
    }

    /// Returns events matching a type prefix.
    #[must_use]
    pub fn events_of_type(&self, type_prefix: &str) -> Vec<BuildEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.event_type.starts_with(type_prefix))
            .cloned()
            .collect()
    }

    /// Returns the progress lines a console sink would have printed.
    #[must_use]
    pub fn notices(&self) -> Vec<String> {
        self.events
            .read()
            .iter()
            .filter_map(|e| e.notice().map(ToString::to_string))
            .collect()
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn emit(&self, event: &BuildEvent) {
        self.events.write().push(event.clone());
    }
}
