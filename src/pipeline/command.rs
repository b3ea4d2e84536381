// file: src/pipeline/command.rs
// description: argument lists for the filter, omega and rocs executables
// reference: structured process invocation instead of shell strings

use crate::config::ToolsConfig;
use crate::models::Stage;
use crate::pipeline::validator::ValidatedInputs;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolCommand {
    pub stage: Stage,
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl ToolCommand {
    /// Builds the invocation for `stage` reading from `input`. Output names
    /// are relative, so the tool writes into `working_dir`.
    pub fn for_stage(
        stage: Stage,
        input: &Path,
        inputs: &ValidatedInputs,
        tools: &ToolsConfig,
        working_dir: &Path,
    ) -> Self {
        let input = input.display().to_string();

        let (program, args) = match stage {
            Stage::BasicFilter => (
                &tools.filter,
                filter_args(&input, stage, &inputs.basic_filter.as_arg()),
            ),
            Stage::SecondaryFilter(kind) => (&tools.filter, filter_args(&input, stage, kind.as_str())),
            Stage::ConformerGeneration => (
                &tools.conformer,
                vec![
                    "rocs".to_string(),
                    "-in".to_string(),
                    input,
                    "-out".to_string(),
                    output_name(stage),
                    "-mpi_np".to_string(),
                    inputs.mpi_np.to_string(),
                    "-progress".to_string(),
                    "percent".to_string(),
                    "-strictstereo".to_string(),
                    "false".to_string(),
                ],
            ),
            Stage::ShapeComparison => (
                &tools.shape,
                vec![
                    "-dbase".to_string(),
                    input,
                    "-query".to_string(),
                    inputs
                        .query
                        .as_ref()
                        .map(|q| q.display().to_string())
                        .unwrap_or_default(),
                    "-mpi_np".to_string(),
                    inputs.mpi_np.to_string(),
                ],
            ),
        };

        Self {
            stage,
            program: program.clone(),
            args,
            working_dir: working_dir.to_path_buf(),
        }
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

fn output_name(stage: Stage) -> String {
    stage.output_file_name().unwrap_or_default().to_string()
}

fn filter_args(input: &str, stage: Stage, filter: &str) -> Vec<String> {
    vec![
        "-in".to_string(),
        input.to_string(),
        "-out".to_string(),
        output_name(stage),
        "-filter".to_string(),
        filter.to_string(),
        "-unique".to_string(),
        "true".to_string(),
        "-mmff".to_string(),
        "true".to_string(),
    ]
}
