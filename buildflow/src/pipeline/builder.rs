//! Pipeline builder with validation.

use super::definition::{Pipeline, DEFAULT_START_NOTICE, DEFAULT_SUCCESS_NOTICE};
use crate::errors::{ContractErrorInfo, PipelineValidationError};
use crate::stages::Stage;
use std::collections::HashSet;

/// Builder for creating validated pipelines.
///
/// Stages run in the order they are added.
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    /// The pipeline name.
    name: String,
    /// Stages in insertion order.
    stages: Vec<Stage>,
    /// Names already taken.
    names: HashSet<String>,
    start_notice: String,
    success_notice: String,
}

impl PipelineBuilder {
    /// Creates a new pipeline builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
            names: HashSet::new(),
            start_notice: DEFAULT_START_NOTICE.to_string(),
            success_notice: DEFAULT_SUCCESS_NOTICE.to_string(),
        }
    }

    /// Appends a stage.
    ///
    /// # Errors
    ///
    /// Returns an error if the stage is invalid or its name is taken.
    pub fn stage(mut self, stage: Stage) -> Result<Self, PipelineValidationError> {
        self.add_stage(stage)?;
        Ok(self)
    }

    /// Appends a stage in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the stage is invalid or its name is taken.
    pub fn add_stage(&mut self, stage: Stage) -> Result<(), PipelineValidationError> {
        stage.validate()?;

        if !self.names.insert(stage.name().to_string()) {
            return Err(PipelineValidationError::new(format!(
                "Stage '{}' is defined more than once",
                stage.name()
            ))
            .with_stages(vec![stage.name().to_string()])
            .with_error_info(
                ContractErrorInfo::new(
                    "CONTRACT-002-DUPLICATE",
                    format!("Duplicate stage name '{}'", stage.name()),
                )
                .with_fix_hint("Stage names identify stages in progress output and errors; keep them unique."),
            ));
        }

        self.stages.push(stage);
        Ok(())
    }

    /// Overrides the line printed when a run starts.
    #[must_use]
    pub fn start_notice(mut self, notice: impl Into<String>) -> Self {
        self.start_notice = notice.into();
        self
    }

    /// Overrides the line printed when a run succeeds.
    #[must_use]
    pub fn success_notice(mut self, notice: impl Into<String>) -> Self {
        self.success_notice = notice.into();
        self
    }

    /// Builds the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder has no stages.
    pub fn build(self) -> Result<Pipeline, PipelineValidationError> {
        if self.stages.is_empty() {
            return Err(PipelineValidationError::new("Pipeline has no stages")
                .with_error_info(
                    ContractErrorInfo::new("CONTRACT-001-EMPTY", "Cannot build an empty pipeline")
                        .with_fix_hint("Add at least one stage to the pipeline before building."),
                ));
        }

        Ok(Pipeline::new(
            self.name,
            self.stages,
            self.start_notice,
            self.success_notice,
        ))
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::CommandSpec;
    use pretty_assertions::assert_eq;

    fn stage(name: &str) -> Stage {
        Stage::new(name, format!("{name}..."), CommandSpec::new("true"))
    }

    #[test]
    fn test_builder_creation() {
        let builder = PipelineBuilder::new("test");
        assert_eq!(builder.name(), "test");
        assert_eq!(builder.stage_count(), 0);
    }

    #[test]
    fn test_builder_preserves_order() {
        let pipeline = PipelineBuilder::new("test")
            .stage(stage("c"))
            .unwrap()
            .stage(stage("a"))
            .unwrap()
            .stage(stage("b"))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(pipeline.stage_names(), vec!["c", "a", "b"]);
        assert_eq!(pipeline.stage_count(), 3);
        assert!(pipeline.stage("a").is_some());
        assert!(pipeline.stage("z").is_none());
    }

    #[test]
    fn test_builder_duplicate_name() {
        let result = PipelineBuilder::new("test")
            .stage(stage("css"))
            .unwrap()
            .stage(stage("css"));

        let err = result.unwrap_err();
        assert_eq!(err.code(), Some("CONTRACT-002-DUPLICATE"));
        assert_eq!(err.stages, vec!["css".to_string()]);
    }

    #[test]
    fn test_builder_rejects_invalid_stage() {
        let mut builder = PipelineBuilder::new("test");
        let err = builder
            .add_stage(Stage::new("bad", "bad", CommandSpec::new("")))
            .unwrap_err();
        assert_eq!(err.code(), Some("CONTRACT-004-EMPTY_PROGRAM"));
        assert_eq!(builder.stage_count(), 0);
    }

    #[test]
    fn test_builder_empty_build() {
        let err = PipelineBuilder::new("test").build().unwrap_err();
        assert_eq!(err.code(), Some("CONTRACT-001-EMPTY"));
    }

    #[test]
    fn test_builder_notices() {
        let pipeline = PipelineBuilder::new("test")
            .stage(stage("a"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(pipeline.start_notice(), DEFAULT_START_NOTICE);
        assert_eq!(pipeline.success_notice(), DEFAULT_SUCCESS_NOTICE);

        let pipeline = PipelineBuilder::new("test")
            .start_notice("go")
            .success_notice("done")
            .stage(stage("a"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(pipeline.start_notice(), "go");
        assert_eq!(pipeline.success_notice(), "done");
    }
}
