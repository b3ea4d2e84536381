// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("-{key} {} file does not exist.", .path.display())]
    FileNotFound { key: &'static str, path: PathBuf },

    #[error("-{key} is required for this stage plan but was not provided")]
    MissingArgument { key: &'static str },

    #[error("Filter option is not defined: {0}")]
    FilterSelection(String),

    #[error("{stage} stage failed: `{command}` exited with {status}")]
    ExternalTool {
        stage: String,
        command: String,
        status: String,
    },

    #[error("Failed to launch `{command}`: {source}")]
    ToolLaunch {
        command: String,
        source: std::io::Error,
    },

    #[error("{stage} stage produced no output at {}", .path.display())]
    MissingOutput { stage: String, path: PathBuf },

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PipelineError {
    /// Process exit status for this failure. Usage problems share clap's code;
    /// failed or missing tool runs exit with 3.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Usage(_) => 2,
            PipelineError::ExternalTool { .. }
            | PipelineError::ToolLaunch { .. }
            | PipelineError::MissingOutput { .. } => 3,
            _ => 1,
        }
    }

    pub fn file_operation(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::FileOperation {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_message_names_flag() {
        let err = PipelineError::FileNotFound {
            key: "in",
            path: PathBuf::from("mols.smi"),
        };
        assert_eq!(err.to_string(), "-in mols.smi file does not exist.");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(PipelineError::Usage("x".to_string()).exit_code(), 2);
        assert_eq!(
            PipelineError::FilterSelection("x".to_string()).exit_code(),
            1
        );
        let tool = PipelineError::ExternalTool {
            stage: "basic filter".to_string(),
            command: "filter".to_string(),
            status: "exit status: 1".to_string(),
        };
        assert_eq!(tool.exit_code(), 3);
    }
}
