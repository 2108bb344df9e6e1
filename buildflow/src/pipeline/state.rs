//! Run state machine.

use crate::errors::InvocationFailure;
use std::fmt;

/// Where a pipeline run is.
///
/// `Idle -> Running(0) -> ... -> Running(n-1) -> Succeeded`, or
/// `Running(i) -> Failed { index: i, .. }`. Both `Succeeded` and `Failed`
/// are terminal: further transitions leave them unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunState {
    /// Not started.
    #[default]
    Idle,
    /// The stage at this 0-based index is being evaluated.
    Running(usize),
    /// Every stage completed or was skipped.
    Succeeded,
    /// The stage at `index` failed; nothing after it ran.
    Failed {
        /// 0-based index of the failing stage.
        index: usize,
        /// Why it failed.
        cause: InvocationFailure,
    },
}

impl RunState {
    /// Starts a run over `stage_count` stages.
    #[must_use]
    pub fn start(self, stage_count: usize) -> Self {
        match self {
            Self::Idle if stage_count == 0 => Self::Succeeded,
            Self::Idle => Self::Running(0),
            other => other,
        }
    }

    /// The current stage completed or was skipped.
    #[must_use]
    pub fn advance(self, stage_count: usize) -> Self {
        match self {
            Self::Running(index) if index + 1 >= stage_count => Self::Succeeded,
            Self::Running(index) => Self::Running(index + 1),
            other => other,
        }
    }

    /// The current stage failed.
    #[must_use]
    pub fn fail(self, cause: InvocationFailure) -> Self {
        match self {
            Self::Running(index) => Self::Failed { index, cause },
            other => other,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running(index) => write!(f, "running({index})"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed { index, cause } => write!(f, "failed({index}: {cause})"),
        }
    }
}
