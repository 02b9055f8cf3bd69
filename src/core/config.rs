//! Process-level settings read once from the environment.
//!
//! Only `main` consults these statics. The pipeline itself receives a
//! [`crate::download::pipeline::PipelineConfig`] so nothing below the binary
//! depends on ambient state.

use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: none (terminal logging only)
pub static LOG_FILE_PATH: Lazy<Option<String>> =
    Lazy::new(|| env::var("LOG_FILE_PATH").ok().filter(|p| !p.trim().is_empty()));

/// Log verbosity
/// Read from LOG_LEVEL environment variable
/// Supported: error, warn, info, debug, trace
/// Default: info
pub static LOG_LEVEL: Lazy<String> = Lazy::new(|| env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

/// Parent directory for per-source work areas
/// Read from WORK_DIR environment variable
/// Default: the system temp directory
pub static WORK_DIR: Lazy<Option<PathBuf>> = Lazy::new(|| {
    env::var("WORK_DIR")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
});

/// Keep work areas on disk after each source finishes
/// Read from KEEP_WORK_DIRS environment variable (1/true/yes)
/// Default: false (work areas are removed)
pub static KEEP_WORK_DIRS: Lazy<bool> = Lazy::new(|| {
    env::var("KEEP_WORK_DIRS")
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
});

/// Remote download timeout in seconds
/// Read from DOWNLOAD_TIMEOUT_SECS environment variable
/// Default: network::DOWNLOAD_TIMEOUT_SECS
pub static DOWNLOAD_TIMEOUT_SECS: Lazy<u64> = Lazy::new(|| {
    env::var("DOWNLOAD_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(network::DOWNLOAD_TIMEOUT_SECS)
});

/// Interpret a boolean-ish environment value.
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Where sources and the mode come from
pub mod sources {
    /// Comma-separated list of sources
    pub const LIST_ENV: &str = "ZIP_URLS";

    /// Path of a newline-delimited source file
    pub const FILE_ENV: &str = "ZIP_URLS_FILE";

    /// Source file looked up in the current working directory
    pub const DEFAULT_FILE: &str = "urls.txt";

    /// Operating mode (download, play, both)
    pub const MODE_ENV: &str = "MODE";

    /// Command-line arguments with these prefixes count as sources
    pub const CLI_PREFIXES: &[&str] = &["http://", "https://", "file://"];
}

/// Output and work-area layout
pub mod storage {
    /// Durable output directory, relative to the working directory
    pub const OUTPUT_DIR_NAME: &str = "downloads";

    /// Prefix of every per-source work area
    pub const WORK_AREA_PREFIX: &str = "zipreel-";

    /// File name a remote archive is streamed into
    pub const ARCHIVE_FILE_NAME: &str = "archive.zip";

    /// Subdirectory of a work area that receives the archive contents
    pub const EXTRACT_DIR_NAME: &str = "extracted";
}

/// Recognized media
pub mod media {
    /// Video extensions, compared case-insensitively
    pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "webm", "mov", "avi"];
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Connect and read timeout for remote archives (in seconds)
    pub const DOWNLOAD_TIMEOUT_SECS: u64 = 30;

    /// User agent sent with every request
    pub const USER_AGENT: &str = concat!("zipreel/", env!("CARGO_PKG_VERSION"));

    /// Default timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(DOWNLOAD_TIMEOUT_SECS)
    }
}
