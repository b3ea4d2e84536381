// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod utils;

pub use cli::{Cli, normalize_legacy_flags};
pub use config::{Config, RunConfig, ToolsConfig};
pub use error::{PipelineError, Result};
pub use models::{Directive, FilterArgument, PipelineRequest, SecondaryFilter, Stage, StageName};
pub use pipeline::{
    DirectiveResolver, FileRelocator, InputValidator, PipelineController, PreparedRun, RunReport,
    RunSummary, StagePlan, SystemRunner, ToolCommand, ToolOutcome, ToolRunner,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _config = Config::default_config();
        let _controller = PipelineController::new(Config::default_config(), SystemRunner);
    }
}
