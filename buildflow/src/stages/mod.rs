//! Pipeline stages.
//!
//! A stage pairs a progress notice with one external command, plus an
//! optional rule that can bypass it at run time.

use crate::errors::{ContractErrorInfo, PipelineValidationError};
use crate::invoker::CommandSpec;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// Zero-argument check evaluated immediately before a stage would run.
pub type SkipPredicate = Arc<dyn Fn() -> bool + Send + Sync>;

/// When to bypass a stage, and what to tell the user when it happens.
#[derive(Clone)]
pub struct SkipRule {
    predicate: SkipPredicate,
    notice: String,
}

impl SkipRule {
    /// Creates a skip rule.
    pub fn new<F>(predicate: F, notice: impl Into<String>) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            notice: notice.into(),
        }
    }

    /// Evaluates the predicate.
    #[must_use]
    pub fn applies(&self) -> bool {
        (self.predicate)()
    }

    /// The line printed instead of running the stage.
    #[must_use]
    pub fn notice(&self) -> &str {
        &self.notice
    }
}

impl Debug for SkipRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkipRule")
            .field("notice", &self.notice)
            .finish_non_exhaustive()
    }
}

/// One build step wrapping a single external command.
///
/// Stages are immutable once built.
#[derive(Debug, Clone)]
pub struct Stage {
    name: String,
    notice: String,
    command: CommandSpec,
    skip: Option<SkipRule>,
}

impl Stage {
    /// Creates a stage that always runs.
    #[must_use]
    pub fn new(name: impl Into<String>, notice: impl Into<String>, command: CommandSpec) -> Self {
        Self {
            name: name.into(),
            notice: notice.into(),
            command,
            skip: None,
        }
    }

    /// Bypasses the stage whenever `predicate` returns true.
    #[must_use]
    pub fn skip_when<F>(mut self, predicate: F, notice: impl Into<String>) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.skip = Some(SkipRule::new(predicate, notice));
        self
    }

    /// Bypasses the stage when `skip` is set.
    ///
    /// The flag is captured now, so the predicate is pure.
    #[must_use]
    pub fn skip_if(self, skip: bool, notice: impl Into<String>) -> Self {
        self.skip_when(move || skip, notice)
    }

    /// Returns the name of the stage.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The progress line printed when the stage starts.
    #[must_use]
    pub fn notice(&self) -> &str {
        &self.notice
    }

    /// The external command this stage invokes.
    #[must_use]
    pub const fn command(&self) -> &CommandSpec {
        &self.command
    }

    /// The skip rule, if the stage has one.
    #[must_use]
    pub const fn skip_rule(&self) -> Option<&SkipRule> {
        self.skip.as_ref()
    }

    /// Evaluates the skip rule, returning its notice if the stage is bypassed.
    #[must_use]
    pub fn skip_notice(&self) -> Option<&str> {
        self.skip
            .as_ref()
            .filter(|rule| rule.applies())
            .map(SkipRule::notice)
    }

    /// Validates the stage definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or the program is blank.
    pub fn validate(&self) -> Result<(), PipelineValidationError> {
        if self.name.trim().is_empty() {
            return Err(PipelineValidationError::new("Stage name cannot be empty")
                .with_error_info(
                    ContractErrorInfo::new("CONTRACT-003-EMPTY_NAME", "Stage has no name")
                        .with_fix_hint("Give every stage a short, unique name."),
                ));
        }

        if self.command.program.trim().is_empty() {
            return Err(PipelineValidationError::new(format!(
                "Stage '{}' has no program to run",
                self.name
            ))
            .with_stages(vec![self.name.clone()])
            .with_error_info(
                ContractErrorInfo::new(
                    "CONTRACT-004-EMPTY_PROGRAM",
                    format!("Stage '{}' has an empty command", self.name),
                )
                .with_context_entry("stage", &self.name),
            ));
        }

        Ok(())
    }
}
