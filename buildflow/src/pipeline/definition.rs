//! The ordered stage list a pipeline runs.

use crate::stages::Stage;

/// Printed before the first stage.
pub const DEFAULT_START_NOTICE: &str = "Starting build process...";

/// Printed after the last stage completes or is skipped.
pub const DEFAULT_SUCCESS_NOTICE: &str = "Build completed successfully!";

/// A validated, immutable sequence of stages.
///
/// Built with [`PipelineBuilder`](super::PipelineBuilder); never empty.
#[derive(Debug, Clone)]
pub struct Pipeline {
    name: String,
    stages: Vec<Stage>,
    start_notice: String,
    success_notice: String,
}

impl Pipeline {
    pub(super) fn new(
        name: String,
        stages: Vec<Stage>,
        start_notice: String,
        success_notice: String,
    ) -> Self {
        Self {
            name,
            stages,
            start_notice,
            success_notice,
        }
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stages in execution order.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Returns the stage names in execution order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(Stage::name).collect()
    }

    /// Looks up a stage by name.
    #[must_use]
    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name() == name)
    }

    /// The line printed when a run starts.
    #[must_use]
    pub fn start_notice(&self) -> &str {
        &self.start_notice
    }

    /// The line printed when a run succeeds.
    #[must_use]
    pub fn success_notice(&self) -> &str {
        &self.success_notice
    }
}
