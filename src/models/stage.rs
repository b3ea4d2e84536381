// file: src/models/stage.rs
// description: pipeline stages, stage selectors and their fixed file names
// reference: internal data structures

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Value accepted by `-upto`, `-only` and `-from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageName {
    Basic,
    Pains,
    Blockbuster,
    Oeomega,
    Rocs,
    All,
}

impl StageName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageName::Basic => "basic",
            StageName::Pains => "pains",
            StageName::Blockbuster => "blockbuster",
            StageName::Oeomega => "oeomega",
            StageName::Rocs => "rocs",
            StageName::All => "all",
        }
    }

    /// Position in the canonical filter -> secondary filter -> omega -> rocs
    /// order. `None` for `all`, which is not a single stage.
    pub fn position(&self) -> Option<usize> {
        match self {
            StageName::Basic => Some(0),
            StageName::Pains | StageName::Blockbuster => Some(1),
            StageName::Oeomega => Some(2),
            StageName::Rocs => Some(3),
            StageName::All => None,
        }
    }

    pub fn is_secondary_filter(&self) -> bool {
        matches!(self, StageName::Pains | StageName::Blockbuster)
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in filter presets applied after the basic filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryFilter {
    #[default]
    Pains,
    Blockbuster,
}

impl SecondaryFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecondaryFilter::Pains => "pains",
            SecondaryFilter::Blockbuster => "blockbuster",
        }
    }

    pub fn from_preset(value: &str) -> Option<Self> {
        match value {
            "pains" => Some(SecondaryFilter::Pains),
            "blockbuster" => Some(SecondaryFilter::Blockbuster),
            _ => None,
        }
    }
}

impl fmt::Display for SecondaryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "stage", content = "kind", rename_all = "snake_case")]
pub enum Stage {
    BasicFilter,
    SecondaryFilter(SecondaryFilter),
    ConformerGeneration,
    ShapeComparison,
}

impl Stage {
    /// File the external tool is asked to write, relative to the work dir.
    /// Shape comparison names its own outputs.
    pub fn output_file_name(&self) -> Option<&'static str> {
        match self {
            Stage::BasicFilter => Some("filtered_basic.smi"),
            Stage::SecondaryFilter(SecondaryFilter::Pains) => Some("filtered_pains.smi"),
            Stage::SecondaryFilter(SecondaryFilter::Blockbuster) => {
                Some("filtered_blockbuster.smi")
            }
            Stage::ConformerGeneration => Some("oeomega_conformers.oeb.gz"),
            Stage::ShapeComparison => None,
        }
    }

    /// Directory a stage's outputs are moved into once it finishes.
    pub fn archive_dir_name(&self) -> Option<&'static str> {
        match self {
            Stage::BasicFilter => Some("basic_filter"),
            Stage::SecondaryFilter(SecondaryFilter::Pains) => Some("pains_filter"),
            Stage::SecondaryFilter(SecondaryFilter::Blockbuster) => Some("blockbuster_filter"),
            Stage::ConformerGeneration => Some("oeomega"),
            Stage::ShapeComparison => None,
        }
    }

    /// Where the next stage reads this stage's output from.
    pub fn archived_output(&self, work_dir: &Path) -> Option<PathBuf> {
        let dir = self.archive_dir_name()?;
        let file = self.output_file_name()?;
        Some(work_dir.join(dir).join(file))
    }

    pub fn label(&self) -> String {
        match self {
            Stage::BasicFilter => "basic filter".to_string(),
            Stage::SecondaryFilter(kind) => format!("{} filter", kind),
            Stage::ConformerGeneration => "conformer generation".to_string(),
            Stage::ShapeComparison => "shape comparison".to_string(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Value handed to the filter tool's `-filter` flag for the basic stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterArgument {
    /// The generated `basic` criteria file in the work dir.
    Default,
    Custom(PathBuf),
}

impl FilterArgument {
    pub const DEFAULT_FILE_NAME: &'static str = "basic";

    pub fn as_arg(&self) -> String {
        match self {
            FilterArgument::Default => Self::DEFAULT_FILE_NAME.to_string(),
            FilterArgument::Custom(path) => path.display().to_string(),
        }
    }
}
