// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

pub mod command;
pub mod directive;
pub mod executor;
pub mod orchestrator;
pub mod plan;
pub mod progress;
pub mod relocator;
pub mod runner;
pub mod validator;

pub use command::ToolCommand;
pub use directive::{DirectiveResolver, Resolution};
pub use executor::{StageExecutor, StageOutput};
pub use orchestrator::{PipelineController, PreparedRun, RunReport};
pub use plan::StagePlan;
pub use progress::{RunSummary, StageProgress};
pub use relocator::FileRelocator;
pub use runner::{SystemRunner, ToolOutcome, ToolRunner};
pub use validator::{InputValidator, ValidatedInputs, default_filter_contents};
