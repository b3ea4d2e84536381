// file: src/cli.rs
// description: command line definition and legacy single-dash flag handling
// reference: https://docs.rs/clap

use crate::models::{PipelineRequest, StageName};
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Flags accepted in the legacy single-dash spelling.
pub const LEGACY_FLAGS: &[&str] = &["in", "upto", "only", "from", "filter", "mpi_np", "query"];

#[derive(Parser, Debug)]
#[command(name = "oe_pipeline")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(
    about = "Run the OpenEye filter -> omega -> rocs pipeline, or any contiguous part of it",
    long_about = None
)]
pub struct Cli {
    /// Input file to be filtered. Smiles format recommended.
    #[arg(long = "in", value_name = "INFILE")]
    pub input: Option<PathBuf>,

    /// Run the pipeline from the start up to and including this stage.
    #[arg(long, value_enum, value_name = "STAGE")]
    pub upto: Option<StageName>,

    /// Run only this stage.
    #[arg(long, value_enum, value_name = "STAGE")]
    pub only: Option<StageName>,

    /// Run the pipeline from this stage through rocs.
    #[arg(long, value_enum, value_name = "STAGE")]
    pub from: Option<StageName>,

    /// Filter preset (basic, pains, blockbuster) or a filter criteria file.
    #[arg(long, value_name = "FILTER")]
    pub filter: Option<String>,

    /// How many cores omega and rocs may use. Default 8.
    #[arg(long = "mpi_np", value_name = "CORES", value_parser = clap::value_parser!(u32).range(1..))]
    pub mpi_np: Option<u32>,

    /// Query molecule for running rocs.
    #[arg(long, value_name = "QUERYFILE")]
    pub query: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    pub config: PathBuf,

    /// Directory the tools run in and archives are written to.
    #[arg(long, value_name = "DIR", env = "OE_PIPELINE_WORK_DIR")]
    pub work_dir: Option<PathBuf>,

    /// Resolve and validate, then print the commands instead of running them.
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,

    /// With --dry-run, print the commands as JSON.
    #[arg(long, action = ArgAction::SetTrue, requires = "dry_run")]
    pub json: bool,

    /// Keep running later stages after a tool fails.
    #[arg(long, action = ArgAction::SetTrue)]
    pub keep_going: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}

impl Cli {
    /// Parses `args` after rewriting legacy `-in` style flags.
    pub fn parse_legacy<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(normalize_legacy_flags(args))
    }

    pub fn try_parse_legacy<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_legacy_flags(args))
    }

    pub fn request(&self) -> PipelineRequest {
        PipelineRequest {
            input: self.input.clone(),
            upto: self.upto,
            only: self.only,
            from: self.from,
            filter: self.filter.clone(),
            mpi_np: self.mpi_np,
            query: self.query.clone(),
        }
    }
}

/// Rewrites `-in x` and `-in=x` to `--in x` / `--in=x` for the legacy flag
/// names. Everything else, including values that happen to look like flags
/// after a legacy flag, passes through untouched.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };

            let Some(rest) = text.strip_prefix('-') else {
                return arg;
            };

            if rest.starts_with('-') {
                return arg;
            }

            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if LEGACY_FLAGS.contains(&name) {
                OsString::from(format!("-{}", text))
            } else {
                arg
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_normalize_legacy_flags() {
        let normalized = normalize_legacy_flags([
            "oe_pipeline",
            "-in",
            "mols.smi",
            "-upto=oeomega",
            "-mpi_np",
            "16",
            "--verbose",
            "-v",
        ]);
        assert_eq!(
            normalized,
            os(&[
                "oe_pipeline",
                "--in",
                "mols.smi",
                "--upto=oeomega",
                "--mpi_np",
                "16",
                "--verbose",
                "-v",
            ])
        );
    }

    #[test]
    fn test_parse_legacy_invocation() {
        let cli = Cli::try_parse_legacy([
            "oe_pipeline",
            "-in",
            "mols.smi",
            "-from",
            "rocs",
            "-query",
            "q.sdf",
        ])
        .unwrap();

        let request = cli.request();
        assert_eq!(request.input, Some(PathBuf::from("mols.smi")));
        assert_eq!(request.from, Some(StageName::Rocs));
        assert_eq!(request.query, Some(PathBuf::from("q.sdf")));
        assert_eq!(request.mpi_np, None);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_unknown_stage_rejected() {
        let err = Cli::try_parse_legacy(["oe_pipeline", "-in", "mols.smi", "-only", "vina"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_mpi_np_must_be_positive() {
        assert!(
            Cli::try_parse_legacy(["oe_pipeline", "-in", "m.smi", "-upto", "all", "-mpi_np", "0"])
                .is_err()
        );
        let cli =
            Cli::try_parse_legacy(["oe_pipeline", "-in", "m.smi", "-upto", "all", "-mpi_np", "4"])
                .unwrap();
        assert_eq!(cli.mpi_np, Some(4));
    }

    #[test]
    fn test_json_requires_dry_run() {
        assert!(Cli::try_parse_legacy(["oe_pipeline", "-in", "m.smi", "--json"]).is_err());
        let cli = Cli::try_parse_legacy(["oe_pipeline", "-in", "m.smi", "--dry-run", "--json"])
            .unwrap();
        assert!(cli.json);
    }
}
