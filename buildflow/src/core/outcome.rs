//! Per-stage outcome recorded during a single pipeline run.

use super::StageStatus;
use serde::{Deserialize, Serialize};

/// The outcome of one stage within a run.
///
/// Outcomes only live as long as the run that produced them; nothing is
/// persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageOutcome {
    /// The final status of the stage.
    pub status: StageStatus,

    /// Exit code of the external command, when it ran and produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,

    /// Why the stage was skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,

    /// Wall-clock time spent on the stage.
    pub duration_ms: f64,
}

impl StageOutcome {
    /// A stage whose command exited with status zero.
    #[must_use]
    pub const fn ok(exit_code: Option<i32>, duration_ms: f64) -> Self {
        Self {
            status: StageStatus::Ok,
            exit_code,
            skip_reason: None,
            duration_ms,
        }
    }

    /// A stage bypassed by its skip predicate.
    #[must_use]
    pub fn skip(reason: impl Into<String>) -> Self {
        Self {
            status: StageStatus::Skip,
            exit_code: None,
            skip_reason: Some(reason.into()),
            duration_ms: 0.0,
        }
    }

    /// Returns true if the stage was skipped.
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.status == StageStatus::Skip
    }
}
