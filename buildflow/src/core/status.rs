//! Stage status enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a stage in a finished run ended.
///
/// Only stages that let the run continue have a status; a failing stage ends
/// the run with a [`StageInvocationError`](crate::errors::StageInvocationError)
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Stage's command exited with status zero.
    Ok,
    /// Stage was bypassed by its skip predicate.
    Skip,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Skip => write!(f, "skip"),
        }
    }
}
