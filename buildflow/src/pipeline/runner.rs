//! Sequential, fail-fast pipeline execution.

use super::{Pipeline, RunState};
use crate::core::{BuildEvent, StageOutcome};
use crate::errors::{BuildflowError, InvocationFailure, StageInvocationError};
use crate::events::{EventSink, NoOpEventSink};
use crate::invoker::Invoker;
use crate::stages::Stage;
use crate::utils::{elapsed_ms, generate_run_id};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

/// Summary of a successful run.
///
/// Reports are handed to the caller and then dropped; nothing is cached
/// between runs.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Identifier of this run, for log correlation.
    pub run_id: Uuid,
    /// Name of the pipeline that ran.
    pub pipeline: String,
    /// Per-stage outcomes in execution order.
    pub outcomes: Vec<(String, StageOutcome)>,
    /// Total wall-clock time.
    pub duration_ms: f64,
    /// Final state; always [`RunState::Succeeded`].
    pub state: RunState,
}

impl PipelineReport {
    /// Names of stages whose command actually ran.
    #[must_use]
    pub fn invoked_stages(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| !outcome.is_skipped())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Names of stages bypassed by their skip rule.
    #[must_use]
    pub fn skipped_stages(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_skipped())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Executes a pipeline's stages one at a time, stopping at the first failure.
pub struct PipelineRunner {
    pipeline: Pipeline,
    invoker: Arc<dyn Invoker>,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for PipelineRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineRunner")
            .field("pipeline", &self.pipeline.name())
            .field("stages", &self.pipeline.stage_names())
            .finish_non_exhaustive()
    }
}

impl PipelineRunner {
    /// Creates a runner that reports nowhere.
    #[must_use]
    pub fn new(pipeline: Pipeline, invoker: Arc<dyn Invoker>) -> Self {
        Self {
            pipeline,
            invoker,
            sink: Arc::new(NoOpEventSink),
        }
    }

    /// Sets the event sink progress is reported to.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the pipeline this runner executes.
    #[must_use]
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Runs every stage in order.
    ///
    /// Each stage's skip rule is evaluated right before it would start. A
    /// stage only starts after its predecessor succeeded or was skipped.
    ///
    /// # Errors
    ///
    /// Returns [`BuildflowError::StageInvocation`] for the first stage whose
    /// command fails or cannot be started. No later stage is invoked.
    pub async fn run(&self) -> Result<PipelineReport, BuildflowError> {
        let run_id = generate_run_id();
        let span = info_span!("pipeline", name = %self.pipeline.name(), run_id = %run_id);
        self.execute(run_id).instrument(span).await
    }

    async fn execute(&self, run_id: Uuid) -> Result<PipelineReport, BuildflowError> {
        let start = Instant::now();
        let stage_count = self.pipeline.stage_count();
        let mut state = RunState::Idle.start(stage_count);
        let mut outcomes = Vec::with_capacity(stage_count);

        info!(stages = stage_count, "pipeline started");
        self.sink
            .emit(&BuildEvent::pipeline_started(
                self.pipeline.name(),
                &run_id.to_string(),
                self.pipeline.start_notice(),
            ))
            .await;

        for (index, stage) in self.pipeline.stages().iter().enumerate() {
            let position = index + 1;
            debug!(state = %state, stage = stage.name(), "next stage");

            if let Some(notice) = stage.skip_notice() {
                info!(stage = stage.name(), position, "stage skipped");
                self.sink
                    .emit(&BuildEvent::stage_skipped(stage.name(), position, notice))
                    .await;
                outcomes.push((stage.name().to_string(), StageOutcome::skip(notice)));
                state = state.advance(stage_count);
                continue;
            }

            match self.run_stage(stage, position).await {
                Ok(outcome) => {
                    outcomes.push((stage.name().to_string(), outcome));
                    state = state.advance(stage_count);
                }
                Err(err) => {
                    state = state.fail(err.cause.clone());
                    error!(state = %state, error = %err, "pipeline failed");
                    self.sink
                        .emit(&BuildEvent::pipeline_failed(
                            self.pipeline.name(),
                            &err.to_string(),
                        ))
                        .await;
                    return Err(err.into());
                }
            }
        }

        let duration_ms = elapsed_ms(start);
        info!(duration_ms, "pipeline completed");
        self.sink
            .emit(&BuildEvent::pipeline_completed(
                self.pipeline.name(),
                duration_ms,
                self.pipeline.success_notice(),
            ))
            .await;

        Ok(PipelineReport {
            run_id,
            pipeline: self.pipeline.name().to_string(),
            outcomes,
            duration_ms,
            state,
        })
    }

    async fn run_stage(
        &self,
        stage: &Stage,
        position: usize,
    ) -> Result<StageOutcome, StageInvocationError> {
        let span = info_span!("stage", name = stage.name(), position);

        async {
            self.sink
                .emit(&BuildEvent::stage_started(stage.name(), position, stage.notice()))
                .await;

            debug!(command = %stage.command(), "invoking");
            let start = Instant::now();

            let cause = match self.invoker.invoke(stage.command()).await {
                Ok(invocation) if invocation.success => {
                    let duration_ms = elapsed_ms(start);
                    info!(duration_ms, "stage completed");
                    self.sink
                        .emit(&BuildEvent::stage_completed(stage.name(), position, duration_ms))
                        .await;
                    return Ok(StageOutcome::ok(invocation.exit_code, duration_ms));
                }
                Ok(invocation) => invocation
                    .exit_code
                    .map_or(InvocationFailure::Terminated, InvocationFailure::ExitCode),
                Err(e) => InvocationFailure::from(e),
            };

            let err = StageInvocationError::new(stage.name(), position, cause);
            error!(command = %stage.command(), error = %err.cause, "stage failed");
            self.sink
                .emit(&BuildEvent::stage_failed(
                    stage.name(),
                    position,
                    &err.cause.to_string(),
                ))
                .await;
            Err(err)
        }
        .instrument(span)
        .await
    }
}
