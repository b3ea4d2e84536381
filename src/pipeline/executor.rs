// file: src/pipeline/executor.rs
// description: runs each planned stage, archives its output and hands the archived path on
// reference: sequential stage execution over the tool runner seam

use crate::config::ToolsConfig;
use crate::error::{PipelineError, Result};
use crate::models::Stage;
use crate::pipeline::command::ToolCommand;
use crate::pipeline::plan::StagePlan;
use crate::pipeline::progress::StageProgress;
use crate::pipeline::relocator::FileRelocator;
use crate::pipeline::runner::{ToolOutcome, ToolRunner};
use crate::pipeline::validator::ValidatedInputs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// What one stage did. `output` is the archived file the next stage reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    pub stage: Stage,
    pub command: ToolCommand,
    pub outcome: ToolOutcome,
    pub archived: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    /// Failure tolerated under keep-going.
    pub failure: Option<String>,
}

pub struct StageExecutor<'a, R: ToolRunner> {
    runner: &'a R,
    tools: &'a ToolsConfig,
    work_dir: PathBuf,
    settle_delay: Duration,
    fail_fast: bool,
}

impl<'a, R: ToolRunner> StageExecutor<'a, R> {
    /// `work_dir` must be absolute: archived paths are handed to tools that
    /// run inside it.
    pub fn new(runner: &'a R, tools: &'a ToolsConfig, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            tools,
            work_dir: work_dir.into(),
            settle_delay: Duration::ZERO,
            fail_fast: true,
        }
    }

    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub async fn execute(
        &self,
        plan: &StagePlan,
        inputs: &ValidatedInputs,
        progress: &mut StageProgress,
    ) -> Result<Vec<StageOutput>> {
        let relocator = FileRelocator::new(&self.work_dir).protect_all(inputs.protected_paths());
        let total = plan.len();
        let mut current_input = inputs.input.clone();
        let mut outputs = Vec::with_capacity(total);

        for (index, stage) in plan.stages().iter().copied().enumerate() {
            progress.start_stage(index + 1, total, &stage.label());
            info!("Running the {} ({}/{})", stage, index + 1, total);

            let command =
                ToolCommand::for_stage(stage, &current_input, inputs, self.tools, &self.work_dir);
            info!("{}", command);

            let (outcome, failure) = match self.runner.run(&command).await {
                Ok(outcome) if outcome.success => (outcome, None),
                Ok(outcome) => {
                    let err = PipelineError::ExternalTool {
                        stage: stage.label(),
                        command: command.command_line(),
                        status: outcome.describe(),
                    };
                    (outcome, Some(err))
                }
                Err(err) => (ToolOutcome::failed(None), Some(err)),
            };

            let mut failure = match failure {
                Some(err) if self.fail_fast => {
                    progress.stage_failed();
                    return Err(err);
                }
                Some(err) => {
                    warn!("{}; continuing", err);
                    progress.stage_failed();
                    Some(err.to_string())
                }
                None => None,
            };

            let archived = relocator.relocate_stage(stage)?;
            let output = stage.archived_output(&self.work_dir);

            // Only a file this run moved into the archive counts as output.
            if let Some(path) = &output {
                if archived.contains(path) {
                    info!("Archived {} file(s); next input {}", archived.len(), path.display());
                } else {
                    let err = PipelineError::MissingOutput {
                        stage: stage.label(),
                        path: path.clone(),
                    };
                    if self.fail_fast {
                        progress.stage_failed();
                        return Err(err);
                    }
                    warn!("{}; continuing", err);
                    failure.get_or_insert_with(|| err.to_string());
                }
                current_input = path.clone();
            }

            match (&failure, outcome.success) {
                (None, _) => progress.stage_completed(archived.len(), output.clone()),
                (Some(_), true) => progress.stage_failed(),
                (Some(_), false) => {}
            }

            let settle = output.is_some() && index + 1 < total && !self.settle_delay.is_zero();

            outputs.push(StageOutput {
                stage,
                command,
                outcome,
                archived,
                output,
                failure,
            });

            if settle {
                tokio::time::sleep(self.settle_delay).await;
            }
        }

        Ok(outputs)
    }
}
