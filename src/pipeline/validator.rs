// file: src/pipeline/validator.rs
// description: checks file-valued directives and provisions the default basic filter file
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use crate::models::{FilterArgument, PipelineRequest};
use crate::pipeline::directive::is_known_filter_kind;
use crate::pipeline::plan::StagePlan;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Criteria written to the default `basic` filter file, as
/// `(name, value, description)`.
pub const DEFAULT_FILTER_CRITERIA: &[(&str, &str, &str)] = &[
    ("MIN_CARBONS", "5", "Minimum number of carbons"),
    ("MAX_CARBONS", "40", "Maximum number of carbons"),
    ("AGGREGATORS", "true", "Eliminate know aggregators"),
    ("PRED_AGG", "true", "Eliminate predicted aggregators"),
    ("MIN_MOLWT", "130", "Minimum molecular weight"),
    ("MAX_MOLWT", "650", "Maximum molecular weight"),
    (
        "MAX_UNBRANCHED",
        "10",
        "Maximum number of connected unbranched non-ring atoms",
    ),
    ("MIN_XLOGP", "-3.0", "Minimum XLogP"),
    ("MAX_XLOGP", "6.5", "Maximum XLogP"),
    ("MIN_RING_SIZE", "5", "Minimum atoms in any ring system"),
    ("TYPECHECK", "true", "Screen for unusual valences or charges"),
    (
        "MMFFTYPECHECK",
        "true",
        "Screen for atoms with unknown MMFF atom types",
    ),
    ("ELIMINATE_METALS", "true", "Eliminate metals"),
];

pub fn default_filter_contents() -> String {
    DEFAULT_FILTER_CRITERIA
        .iter()
        .map(|(name, value, description)| format!("{} {} \"{}\"\n", name, value, description))
        .collect()
}

/// Everything the executor needs, checked and with paths made absolute so the
/// tools can run from the work dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInputs {
    pub input: PathBuf,
    pub query: Option<PathBuf>,
    pub basic_filter: FilterArgument,
    pub mpi_np: u32,
}

impl ValidatedInputs {
    /// User-supplied files that must never be swept into an archive directory.
    pub fn protected_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.input.clone()];
        paths.extend(self.query.clone());
        if let FilterArgument::Custom(path) = &self.basic_filter {
            paths.push(path.clone());
        }
        paths
    }
}

pub struct InputValidator {
    work_dir: PathBuf,
    default_mpi_np: u32,
}

impl InputValidator {
    pub fn new(work_dir: impl Into<PathBuf>, default_mpi_np: u32) -> Self {
        Self {
            work_dir: work_dir.into(),
            default_mpi_np,
        }
    }

    /// Fails on the first missing file, checking `-in` before `-query`.
    pub fn validate(&self, request: &PipelineRequest, plan: &StagePlan) -> Result<ValidatedInputs> {
        let input = Self::require_file("in", request.input.as_deref())?;

        let query = if plan.reaches_shape_comparison() {
            Some(Self::require_file("query", request.query.as_deref())?)
        } else {
            None
        };

        let basic_filter = self.resolve_filter(request.filter.as_deref(), plan)?;
        let mpi_np = request.mpi_np.unwrap_or(self.default_mpi_np);

        Ok(ValidatedInputs {
            input,
            query,
            basic_filter,
            mpi_np,
        })
    }

    fn require_file(key: &'static str, path: Option<&Path>) -> Result<PathBuf> {
        let path = path.ok_or(PipelineError::MissingArgument { key })?;

        if !path.is_file() {
            return Err(PipelineError::FileNotFound {
                key,
                path: path.to_path_buf(),
            });
        }

        fs::canonicalize(path).map_err(|e| PipelineError::file_operation(path, e))
    }

    fn resolve_filter(&self, filter: Option<&str>, plan: &StagePlan) -> Result<FilterArgument> {
        let custom = match filter {
            Some(value) if !is_known_filter_kind(value) && Path::new(value).is_file() => {
                let path = fs::canonicalize(value).map_err(|e| PipelineError::file_operation(value, e))?;
                Some(path)
            }
            _ => None,
        };

        let unrecognized = matches!(
            filter,
            Some(value) if !is_known_filter_kind(value) && custom.is_none()
        );

        if unrecognized || (plan.runs_basic_filter() && custom.is_none()) {
            self.write_default_filter()?;
        }

        Ok(match custom {
            Some(path) => {
                debug!("Using custom filter file {}", path.display());
                FilterArgument::Custom(path)
            }
            None => FilterArgument::Default,
        })
    }

    pub fn write_default_filter(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.work_dir)
            .map_err(|e| PipelineError::file_operation(&self.work_dir, e))?;

        let path = self.work_dir.join(FilterArgument::DEFAULT_FILE_NAME);
        info!("Creating default filter file {}", path.display());
        fs::write(&path, default_filter_contents())
            .map_err(|e| PipelineError::file_operation(&path, e))?;

        Ok(path)
    }
}
