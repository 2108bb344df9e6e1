//! Build lifecycle events.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An event emitted while a pipeline runs.
///
/// Events are consumed by event sinks for console progress, logging,
/// or test assertions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildEvent {
    /// The event type (e.g., "stage.started", "pipeline.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// When the event occurred (ISO 8601).
    pub timestamp: String,

    /// The event payload data.
    #[serde(default)]
    pub data: HashMap<String, serde_json::Value>,
}

impl BuildEvent {
    /// Creates a new event.
    #[must_use]
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            timestamp: crate::utils::iso_timestamp(),
            data: HashMap::new(),
        }
    }

    /// Adds a data field to the event.
    #[must_use]
    pub fn add_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Returns a string field from the payload.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(serde_json::Value::as_str)
    }

    /// The stage this event refers to, if any.
    #[must_use]
    pub fn stage(&self) -> Option<&str> {
        self.get_str("stage")
    }

    /// The human-readable progress line carried by the event, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.get_str("notice")
    }

    /// Creates a "pipeline.started" event.
    #[must_use]
    pub fn pipeline_started(pipeline: &str, run_id: &str, notice: &str) -> Self {
        Self::new("pipeline.started")
            .add_data("pipeline", serde_json::json!(pipeline))
            .add_data("run_id", serde_json::json!(run_id))
            .add_data("notice", serde_json::json!(notice))
    }

    /// Creates a "pipeline.completed" event.
    #[must_use]
    pub fn pipeline_completed(pipeline: &str, duration_ms: f64, notice: &str) -> Self {
        Self::new("pipeline.completed")
            .add_data("pipeline", serde_json::json!(pipeline))
            .add_data("duration_ms", serde_json::json!(duration_ms))
            .add_data("notice", serde_json::json!(notice))
    }

    /// Creates a "pipeline.failed" event.
    #[must_use]
    pub fn pipeline_failed(pipeline: &str, error: &str) -> Self {
        Self::new("pipeline.failed")
            .add_data("pipeline", serde_json::json!(pipeline))
            .add_data("error", serde_json::json!(error))
    }

    /// Creates a "stage.started" event.
    #[must_use]
    pub fn stage_started(stage: &str, position: usize, notice: &str) -> Self {
        Self::new("stage.started")
            .add_data("stage", serde_json::json!(stage))
            .add_data("position", serde_json::json!(position))
            .add_data("notice", serde_json::json!(notice))
    }

    /// Creates a "stage.completed" event.
    #[must_use]
    pub fn stage_completed(stage: &str, position: usize, duration_ms: f64) -> Self {
        Self::new("stage.completed")
            .add_data("stage", serde_json::json!(stage))
            .add_data("position", serde_json::json!(position))
            .add_data("duration_ms", serde_json::json!(duration_ms))
    }

    /// Creates a "stage.failed" event.
    #[must_use]
    pub fn stage_failed(stage: &str, position: usize, error: &str) -> Self {
        Self::new("stage.failed")
            .add_data("stage", serde_json::json!(stage))
            .add_data("position", serde_json::json!(position))
            .add_data("error", serde_json::json!(error))
    }

    /// Creates a "stage.skipped" event.
    #[must_use]
    pub fn stage_skipped(stage: &str, position: usize, notice: &str) -> Self {
        Self::new("stage.skipped")
            .add_data("stage", serde_json::json!(stage))
            .add_data("position", serde_json::json!(position))
            .add_data("notice", serde_json::json!(notice))
    }
}
