// file: src/pipeline/orchestrator.rs
// description: coordinates directive resolution, validation and staged execution
// reference: orchestrates the filter -> omega -> rocs workflow

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::models::PipelineRequest;
use crate::pipeline::command::ToolCommand;
use crate::pipeline::directive::DirectiveResolver;
use crate::pipeline::executor::{StageExecutor, StageOutput};
use crate::pipeline::plan::StagePlan;
use crate::pipeline::progress::{RunSummary, StageProgress};
use crate::pipeline::runner::ToolRunner;
use crate::pipeline::validator::{InputValidator, ValidatedInputs};
use crate::utils::format_info;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// A plan whose inputs have been checked; nothing has been executed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRun {
    pub plan: StagePlan,
    pub inputs: ValidatedInputs,
    pub work_dir: PathBuf,
}

impl PreparedRun {
    /// The commands a successful run would issue, in order.
    pub fn commands(&self, config: &Config) -> Vec<ToolCommand> {
        let mut input = self.inputs.input.clone();

        self.plan
            .stages()
            .iter()
            .map(|stage| {
                let command =
                    ToolCommand::for_stage(*stage, &input, &self.inputs, &config.tools, &self.work_dir);
                if let Some(next) = stage.archived_output(&self.work_dir) {
                    input = next;
                }
                command
            })
            .collect()
    }

    /// Dry-run listing of the command chain: numbered lines, or a JSON array
    /// of the commands.
    pub fn render(&self, config: &Config, json: bool) -> Result<String> {
        let commands = self.commands(config);

        if json {
            return serde_json::to_string_pretty(&commands)
                .map_err(|e| PipelineError::Serialization(e.to_string()));
        }

        let mut rendered = format_info(&format!(
            "{} in {}",
            self.plan.directive(),
            self.work_dir.display()
        ));
        for (index, command) in commands.iter().enumerate() {
            rendered.push_str(&format!("\n  {}. [{}] {}", index + 1, command.stage, command));
        }

        Ok(rendered)
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: RunSummary,
    pub stages: Vec<StageOutput>,
}

pub struct PipelineController<R: ToolRunner> {
    config: Config,
    runner: R,
    show_progress: bool,
    colored: bool,
}

impl<R: ToolRunner> PipelineController<R> {
    pub fn new(config: Config, runner: R) -> Self {
        Self {
            config,
            runner,
            show_progress: false,
            colored: false,
        }
    }

    pub fn with_progress(mut self, colored: bool) -> Self {
        self.show_progress = true;
        self.colored = colored;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Resolves and validates without spawning anything. `Ok(None)` when no
    /// stage selector was supplied.
    pub fn prepare(&self, request: &PipelineRequest) -> Result<Option<PreparedRun>> {
        let Some(resolution) = DirectiveResolver::resolve(request)? else {
            return Ok(None);
        };

        let plan = StagePlan::from_resolution(resolution);
        info!(
            "Resolved {} into {} stage(s): {}",
            plan.directive(),
            plan.len(),
            plan.stages()
                .iter()
                .map(|s| s.label())
                .collect::<Vec<_>>()
                .join(" -> ")
        );

        let work_dir = absolute_work_dir(&self.config.pipeline.work_dir)?;
        let validator = InputValidator::new(&work_dir, self.config.pipeline.default_mpi_np);
        let inputs = validator.validate(request, &plan)?;

        Ok(Some(PreparedRun {
            plan,
            inputs,
            work_dir,
        }))
    }

    pub async fn execute(&self, prepared: &PreparedRun) -> Result<RunReport> {
        let mut progress = if self.show_progress {
            StageProgress::with_color(prepared.plan.len(), self.colored)
        } else {
            StageProgress::hidden(prepared.plan.len())
        };

        let executor = StageExecutor::new(&self.runner, &self.config.tools, &prepared.work_dir)
            .settle_delay(self.config.pipeline.settle_delay())
            .fail_fast(self.config.pipeline.fail_fast);

        let stages = executor
            .execute(&prepared.plan, &prepared.inputs, &mut progress)
            .await?;

        progress.finish();
        let summary = progress.summary();
        info!(
            "Completed {}/{} stage(s) in {}s",
            summary.stages_completed, summary.stages_planned, summary.duration_secs
        );

        Ok(RunReport { summary, stages })
    }

    /// Prepare then execute. `Ok(None)` when there was nothing to do.
    pub async fn run(&self, request: &PipelineRequest) -> Result<Option<RunReport>> {
        match self.prepare(request)? {
            Some(prepared) => Ok(Some(self.execute(&prepared).await?)),
            None => Ok(None),
        }
    }
}

fn absolute_work_dir(work_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(work_dir).map_err(|e| PipelineError::file_operation(work_dir, e))?;
    fs::canonicalize(work_dir).map_err(|e| PipelineError::file_operation(work_dir, e))
}
