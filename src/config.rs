// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub pipeline: RunConfig,
}

/// Executables for the three external OpenEye programs.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub filter: String,
    pub conformer: String,
    pub shape: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    pub work_dir: PathBuf,
    pub default_mpi_np: u32,
    pub settle_delay_ms: u64,
    pub fail_fast: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            filter: "filter".to_string(),
            conformer: "oeomega".to_string(),
            shape: "rocs".to_string(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            default_mpi_np: 8,
            settle_delay_ms: 1000,
            fail_fast: true,
        }
    }
}

impl RunConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("OE_PIPELINE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<()> {
        if self.pipeline.default_mpi_np == 0 {
            return Err(PipelineError::Config(
                "default_mpi_np must be greater than 0".to_string(),
            ));
        }

        for (name, program) in [
            ("tools.filter", &self.tools.filter),
            ("tools.conformer", &self.tools.conformer),
            ("tools.shape", &self.tools.shape),
        ] {
            if program.trim().is_empty() {
                return Err(PipelineError::Config(format!("{} must not be empty", name)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default_config();
        assert_eq!(config.tools.filter, "filter");
        assert_eq!(config.tools.conformer, "oeomega");
        assert_eq!(config.tools.shape, "rocs");
        assert_eq!(config.pipeline.default_mpi_np, 8);
        assert!(config.pipeline.fail_fast);
        assert_eq!(config.pipeline.settle_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pipeline.toml");
        fs::write(
            &path,
            "[tools]\nfilter = \"/opt/openeye/bin/filter\"\n\n[pipeline]\nsettle_delay_ms = 0\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.tools.filter, "/opt/openeye/bin/filter");
        assert_eq!(config.tools.shape, "rocs");
        assert_eq!(config.pipeline.settle_delay_ms, 0);
        assert_eq!(config.pipeline.default_mpi_np, 8);
    }

    #[test]
    fn test_load_rejects_zero_cores() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pipeline.toml");
        fs::write(&path, "[pipeline]\ndefault_mpi_np = 0\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_load_rejects_blank_tool() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pipeline.toml");
        fs::write(&path, "[tools]\nshape = \"  \"\n").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }
}
