// file: src/models/request.rs
// description: user directives gathered from the command line
// reference: internal data structures

use crate::models::stage::StageName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The single effective stage selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "directive", content = "stage", rename_all = "lowercase")]
pub enum Directive {
    Upto(StageName),
    Only(StageName),
    From(StageName),
}

impl Directive {
    pub fn stage_name(&self) -> StageName {
        match self {
            Directive::Upto(name) | Directive::Only(name) | Directive::From(name) => *name,
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Directive::Upto(_) => "upto",
            Directive::Only(_) => "only",
            Directive::From(_) => "from",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{} {}", self.flag(), self.stage_name())
    }
}

/// Raw directives as supplied; nothing here has been checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineRequest {
    pub input: Option<PathBuf>,
    pub upto: Option<StageName>,
    pub only: Option<StageName>,
    pub from: Option<StageName>,
    pub filter: Option<String>,
    pub mpi_np: Option<u32>,
    pub query: Option<PathBuf>,
}

impl PipelineRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: Some(input.into()),
            ..Self::default()
        }
    }

    pub fn upto(mut self, stage: StageName) -> Self {
        self.upto = Some(stage);
        self
    }

    pub fn only(mut self, stage: StageName) -> Self {
        self.only = Some(stage);
        self
    }

    pub fn from_stage(mut self, stage: StageName) -> Self {
        self.from = Some(stage);
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_mpi_np(mut self, mpi_np: u32) -> Self {
        self.mpi_np = Some(mpi_np);
        self
    }

    pub fn with_query(mut self, query: impl Into<PathBuf>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Number of directives that were actually given.
    pub fn supplied_count(&self) -> usize {
        [
            self.input.is_some(),
            self.upto.is_some(),
            self.only.is_some(),
            self.from.is_some(),
            self.filter.is_some(),
            self.mpi_np.is_some(),
            self.query.is_some(),
        ]
        .iter()
        .filter(|supplied| **supplied)
        .count()
    }
}
