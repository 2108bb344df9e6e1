//! Error types for buildflow.
//!
//! Stage failures are the only runtime error kind. Validation errors can only
//! happen while a pipeline is being defined, before anything is invoked.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for buildflow operations.
#[derive(Debug, Error)]
pub enum BuildflowError {
    /// A pipeline definition was rejected.
    #[error("{0}")]
    Validation(#[from] PipelineValidationError),

    /// A stage's external command failed; the run was halted.
    #[error("{0}")]
    StageInvocation(#[from] StageInvocationError),

    /// IO error outside of stage invocation.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildflowError {
    /// Process exit code the orchestrator should terminate with.
    ///
    /// A failing tool's own non-zero exit code is passed through; everything
    /// else maps to 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::StageInvocation(err) => match err.exit_code() {
                Some(code) if code != 0 => code,
                _ => 1,
            },
            Self::Validation(_) | Self::Io(_) => 1,
        }
    }
}

/// Metadata about a definition error for better diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContractErrorInfo {
    /// Error code (e.g., "CONTRACT-002-DUPLICATE").
    pub code: String,
    /// Short summary of the error.
    pub summary: String,
    /// Hint for fixing the error.
    pub fix_hint: Option<String>,
    /// Additional context key-value pairs.
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl ContractErrorInfo {
    /// Creates a new contract error info.
    #[must_use]
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            fix_hint: None,
            context: HashMap::new(),
        }
    }

    /// Sets the fix hint.
    #[must_use]
    pub fn with_fix_hint(mut self, hint: impl Into<String>) -> Self {
        self.fix_hint = Some(hint.into());
        self
    }

    /// Adds a single context entry.
    #[must_use]
    pub fn with_context_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Error raised when a pipeline definition is invalid.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PipelineValidationError {
    /// The error message.
    pub message: String,
    /// The stages involved in the error.
    pub stages: Vec<String>,
    /// Optional contract error info.
    pub error_info: Option<ContractErrorInfo>,
}

impl PipelineValidationError {
    /// Creates a new pipeline validation error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stages: Vec::new(),
            error_info: None,
        }
    }

    /// Sets the stages involved.
    #[must_use]
    pub fn with_stages(mut self, stages: Vec<String>) -> Self {
        self.stages = stages;
        self
    }

    /// Sets the contract error info.
    #[must_use]
    pub fn with_error_info(mut self, info: ContractErrorInfo) -> Self {
        self.error_info = Some(info);
        self
    }

    /// Returns the contract error code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.error_info.as_ref().map(|info| info.code.as_str())
    }
}

/// Why an external command did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationFailure {
    /// The process exited with a non-zero status.
    #[error("exited with status {0}")]
    ExitCode(i32),

    /// The process ended without an exit code (killed by a signal).
    #[error("terminated abnormally without an exit code")]
    Terminated,

    /// The process could not be started at all.
    #[error("failed to start `{program}`: {reason}")]
    Spawn {
        /// The program that was being started.
        program: String,
        /// The underlying OS error.
        reason: String,
    },
}

impl InvocationFailure {
    /// Returns the exit code, when the process produced one.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ExitCode(code) => Some(*code),
            Self::Terminated | Self::Spawn { .. } => None,
        }
    }
}

/// A stage failed and the pipeline was halted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Stage {position} '{stage}' failed: {cause}")]
pub struct StageInvocationError {
    /// Name of the failing stage.
    pub stage: String,
    /// 1-based position of the stage in the pipeline.
    pub position: usize,
    /// What went wrong.
    pub cause: InvocationFailure,
}

impl StageInvocationError {
    /// Creates a new stage invocation error.
    #[must_use]
    pub fn new(stage: impl Into<String>, position: usize, cause: InvocationFailure) -> Self {
        Self {
            stage: stage.into(),
            position,
            cause,
        }
    }

    /// Returns the failing process's exit code, if it had one.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        self.cause.exit_code()
    }
}

/// Errors raised by an invoker before a process outcome exists.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The program could not be spawned.
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        /// The program that was being started.
        program: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl InvokeError {
    /// Creates a spawn error.
    #[must_use]
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }
}

impl From<InvokeError> for InvocationFailure {
    fn from(err: InvokeError) -> Self {
        match err {
            InvokeError::Spawn { program, source } => Self::Spawn {
                program,
                reason: source.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_error_info_creation() {
        let info = ContractErrorInfo::new("TEST-001", "Test error")
            .with_fix_hint("Fix this by doing that")
            .with_context_entry("stage", "css");

        assert_eq!(info.code, "TEST-001");
        assert_eq!(info.fix_hint, Some("Fix this by doing that".to_string()));
        assert_eq!(info.context.get("stage"), Some(&"css".to_string()));
    }

    #[test]
    fn test_validation_error_code() {
        let err = PipelineValidationError::new("bad")
            .with_error_info(ContractErrorInfo::new("CONTRACT-001-EMPTY", "empty"));
        assert_eq!(err.code(), Some("CONTRACT-001-EMPTY"));
        assert_eq!(PipelineValidationError::new("bad").code(), None);
    }

    #[test]
    fn test_stage_invocation_error_display() {
        let err = StageInvocationError::new("client-bundle", 4, InvocationFailure::ExitCode(1));
        assert_eq!(
            err.to_string(),
            "Stage 4 'client-bundle' failed: exited with status 1"
        );
        assert_eq!(err.exit_code(), Some(1));
    }

    #[test]
    fn test_exit_code_passthrough() {
        let err: BuildflowError =
            StageInvocationError::new("server", 6, InvocationFailure::ExitCode(2)).into();
        assert_eq!(err.exit_code(), 2);

        let err: BuildflowError =
            StageInvocationError::new("server", 6, InvocationFailure::Terminated).into();
        assert_eq!(err.exit_code(), 1);

        let err: BuildflowError = PipelineValidationError::new("bad").into();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_invoke_error_into_failure() {
        let err = InvokeError::spawn(
            "esbuild",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        let failure = InvocationFailure::from(err);
        assert!(matches!(failure, InvocationFailure::Spawn { ref program, .. } if program == "esbuild"));
        assert_eq!(failure.exit_code(), None);
    }
}
