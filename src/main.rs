// file: src/main.rs
// description: commandline application entry point
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use oe_pipeline::utils::{format_error, format_info, format_success, format_warning};
use oe_pipeline::{Cli, Config, PipelineController, PipelineError, PreparedRun, SystemRunner};
use std::path::Path;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_legacy(std::env::args_os());

    oe_pipeline::utils::logging::init_logger(cli.color, cli.verbose);

    if let Err(err) = run(cli).await {
        let code = err
            .downcast_ref::<PipelineError>()
            .map_or(1, PipelineError::exit_code);
        eprintln!("{}", format_error(&format!("{:#}", err)));
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    info!("OpenEye staged pipeline");

    let mut config = load_config(&cli.config)?;
    if let Some(work_dir) = &cli.work_dir {
        config.pipeline.work_dir = work_dir.clone();
    }
    if cli.keep_going {
        config.pipeline.fail_fast = false;
    }

    let request = cli.request();
    let controller = PipelineController::new(config, SystemRunner).with_progress(cli.color);

    let Some(prepared) = controller
        .prepare(&request)
        .context("Pipeline validation failed")?
    else {
        println!(
            "{}",
            format_info("Exiting. Nothing to do. -upto/-only/-from argument not provided")
        );
        return Ok(());
    };

    if cli.dry_run {
        return print_plan(controller.config(), &prepared, cli.json);
    }

    let report = controller
        .execute(&prepared)
        .await
        .context("Pipeline run failed")?;
    let summary = &report.summary;

    let line = format!(
        "{}/{} stage(s) finished ({:.0}%), {} file(s) archived in {}s",
        summary.stages_completed,
        summary.stages_planned,
        summary.completion_rate(),
        summary.files_archived,
        summary.duration_secs
    );
    if summary.is_clean() {
        println!("{}", format_success(&line));
    } else {
        println!("{}", format_warning(&line));
    }

    if let Some(output) = &summary.final_output {
        info!("Last archived output: {}", output.display());
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    info!("Loading configuration from: {}", path.display());

    if path.exists() {
        return Config::load(Some(path)).context("Failed to load configuration");
    }

    warn!(
        "Config file {} not found, using default configuration",
        path.display()
    );
    Ok(Config::load(None).unwrap_or_else(|e| {
        warn!("Falling back to built-in defaults: {}", e);
        Config::default_config()
    }))
}

fn print_plan(config: &Config, prepared: &PreparedRun, json: bool) -> Result<()> {
    println!("{}", prepared.render(config, json)?);
    Ok(())
}
