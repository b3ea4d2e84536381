// file: src/pipeline/relocator.rs
// description: moves a finished stage's output files into its archive directory
// reference: https://docs.rs/walkdir

use crate::error::{PipelineError, Result};
use crate::models::Stage;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

lazy_static! {
    // The basic filter archive also takes the generated `basic` criteria file.
    pub static ref BASIC_FILTER_OUTPUT: Regex = Regex::new(
        r"(?i)^filter[ed.]*|^basic$"
    ).expect("BASIC_FILTER_OUTPUT regex is valid");

    pub static ref FILTER_OUTPUT: Regex = Regex::new(
        r"(?i)^filter[ed.]*"
    ).expect("FILTER_OUTPUT regex is valid");

    pub static ref CONFORMER_OUTPUT: Regex = Regex::new(
        r"(?i)^oeomega_"
    ).expect("CONFORMER_OUTPUT regex is valid");
}

pub fn archive_pattern(stage: Stage) -> Option<&'static Regex> {
    match stage {
        Stage::BasicFilter => Some(&*BASIC_FILTER_OUTPUT),
        Stage::SecondaryFilter(_) => Some(&*FILTER_OUTPUT),
        Stage::ConformerGeneration => Some(&*CONFORMER_OUTPUT),
        Stage::ShapeComparison => None,
    }
}

pub struct FileRelocator {
    work_dir: PathBuf,
    protected: Vec<PathBuf>,
}

impl FileRelocator {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            protected: Vec::new(),
        }
    }

    /// Never move `path`, even when its name matches a stage pattern.
    pub fn protect(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.protected
            .push(fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()));
        self
    }

    pub fn protect_all<I, P>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths.into_iter().fold(self, |relocator, path| relocator.protect(path))
    }

    /// Moves matching top-level files of the work dir into `dir_name`,
    /// which is always created. Subdirectories, including other stages'
    /// archives, are never descended into. Returns the new paths.
    pub fn relocate(&self, dir_name: &str, pattern: &Regex) -> Result<Vec<PathBuf>> {
        let target = self.work_dir.join(dir_name);
        fs::create_dir_all(&target).map_err(|e| PipelineError::file_operation(&target, e))?;

        let mut moved = Vec::new();
        for entry in WalkDir::new(&self.work_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };

            if !pattern.is_match(name) || self.is_protected(entry.path()) {
                continue;
            }

            let destination = target.join(name);
            fs::rename(entry.path(), &destination)
                .map_err(|e| PipelineError::file_operation(entry.path(), e))?;

            debug!("Moved {} -> {}", name, destination.display());
            moved.push(destination);
        }

        Ok(moved)
    }

    /// Archives whatever `stage` left in the work dir. Shape comparison is
    /// terminal and has nothing to archive.
    pub fn relocate_stage(&self, stage: Stage) -> Result<Vec<PathBuf>> {
        match (stage.archive_dir_name(), archive_pattern(stage)) {
            (Some(dir), Some(pattern)) => self.relocate(dir, pattern),
            _ => Ok(Vec::new()),
        }
    }

    fn is_protected(&self, path: &Path) -> bool {
        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        self.protected.iter().any(|p| *p == canonical)
    }
}
