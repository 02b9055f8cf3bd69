use anyhow::Result;
use dotenvy::dotenv;
use std::time::Duration;

use zipreel::cli::Cli;
use zipreel::core::config::{self, storage};
use zipreel::core::{init_logger, log_startup_configuration};
use zipreel::download::workspace::WorkAreaRetention;
use zipreel::{PipelineConfig, PipelineOrchestrator, Resolution, ResolverInputs, SourceResolver};

/// Main entry point
///
/// Resolves sources and mode, then runs every source through the pipeline.
/// Per-source failures are logged and do not change the exit status.
///
/// # Errors
/// Returns an error only if startup fails (logging, output directory, HTTP client).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present, before any config is read
    let _ = dotenv();

    let cli = Cli::parse_args();

    init_logger(&config::LOG_LEVEL, config::LOG_FILE_PATH.as_deref())?;

    let inputs = ResolverInputs::from_env(cli.sources.clone(), cli.mode.clone());
    let Resolution { sources, mode, origin } = SourceResolver::from_inputs(inputs).resolve();

    if sources.is_empty() {
        log::info!("ℹ️  No URLs provided. Nothing to process, exiting gracefully.");
        return Ok(());
    }
    if let Some(origin) = origin {
        log::info!("Found {} source(s) in {}", sources.len(), origin);
    }

    let output_dir = std::env::current_dir()?.join(storage::OUTPUT_DIR_NAME);
    let pipeline_config = PipelineConfig::new(output_dir, mode)
        .retention(WorkAreaRetention::from_flag(
            cli.keep_work_dirs || *config::KEEP_WORK_DIRS,
        ))
        .work_root(config::WORK_DIR.clone())
        .download_timeout(Duration::from_secs(*config::DOWNLOAD_TIMEOUT_SECS));

    log_startup_configuration(&pipeline_config);

    let orchestrator = PipelineOrchestrator::new(pipeline_config)?;
    orchestrator.run_batch(&sources).await;

    Ok(())
}
