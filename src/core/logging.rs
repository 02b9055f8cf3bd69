//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (stdout, plus an optional log file)
//! - A one-shot dump of the effective run configuration

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::download::pipeline::PipelineConfig;

/// Parse a textual level, falling back to `Info` for anything unknown.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Initialize logger for console and, optionally, file output
///
/// Every line goes to standard output so per-source failures show up in the
/// same stream as progress lines.
///
/// # Arguments
/// * `level` - Log level name (see [`parse_level`])
/// * `log_file_path` - Optional path to an additional log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to initialize logger
pub fn init_logger(level: &str, log_file_path: Option<&str>) -> Result<()> {
    let level = parse_level(level);
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Debug).build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stdout,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file_path {
        let log_file = File::create(path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;
        loggers.push(WriteLogger::new(level, config, log_file));
    }

    CombinedLogger::init(loggers).map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at startup
pub fn log_startup_configuration(config: &PipelineConfig) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("🎬 zipreel {}", env!("CARGO_PKG_VERSION"));
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("Using mode: {}", config.mode);
    log::info!("Output directory: {}", config.output_dir.display());
    log::info!("Download timeout: {}s", config.download_timeout.as_secs());
    match &config.work_root {
        Some(root) => log::info!("Work areas under: {}", root.display()),
        None => log::debug!("Work areas under the system temp directory"),
    }
    if config.retention.keeps() {
        log::info!("Work areas are kept after each source");
    }
}
