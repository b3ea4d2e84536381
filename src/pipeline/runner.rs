// file: src/pipeline/runner.rs
// description: seam between the executor and the external OpenEye processes
// reference: https://docs.rs/tokio/latest/tokio/process

use crate::error::{PipelineError, Result};
use crate::pipeline::command::ToolCommand;
use std::future::Future;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolOutcome {
    pub success: bool,
    pub code: Option<i32>,
}

impl ToolOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    pub fn failed(code: Option<i32>) -> Self {
        Self {
            success: false,
            code,
        }
    }

    pub fn describe(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {}", code),
            None => "termination by signal".to_string(),
        }
    }
}

pub trait ToolRunner {
    /// Runs `command` to completion.
    fn run(&self, command: &ToolCommand) -> impl Future<Output = Result<ToolOutcome>> + Send;
}

/// Spawns the real executables, inheriting the terminal so the tools'
/// own progress output stays visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutcome> {
        debug!("Spawning {} in {}", command, command.working_dir.display());

        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.working_dir)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|source| PipelineError::ToolLaunch {
                command: command.command_line(),
                source,
            })?;

        Ok(if status.success() {
            ToolOutcome::succeeded()
        } else {
            ToolOutcome::failed(status.code())
        })
    }
}
