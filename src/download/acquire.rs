//! ArchiveAcquirer: turns a `Source` into a local archive path.
//!
//! - `InlineFileUrl`: scheme stripped, used in place if it exists
//! - `LocalPath`: used in place if it exists
//! - `RemoteUrl`: streamed chunk by chunk into the source's work area

use futures_util::StreamExt;
use reqwest::Client;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::core::config::network;
use crate::core::error::{AppError, AppResult};
use crate::download::source::Source;
use crate::download::workspace::WorkingArea;

/// Why an archive could not be obtained.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// Local or inline file does not exist
    #[error("Local file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Remote reference is not an http(s) URL
    #[error("Unsupported source: {0}")]
    InvalidScheme(String),

    /// Transport error or non-success status
    #[error("Failed to download {url}: {source}")]
    NetworkFailure {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Archive bytes could not be written to the work area
    #[error("Failed to write archive: {0}")]
    Io(#[from] std::io::Error),
}

impl AcquisitionError {
    pub fn kind(&self) -> &'static str {
        match self {
            AcquisitionError::NotFound(_) => "NotFound",
            AcquisitionError::InvalidScheme(_) => "InvalidScheme",
            AcquisitionError::NetworkFailure { .. } => "NetworkFailure",
            AcquisitionError::Io(_) => "IoFailure",
        }
    }
}

/// Fetches or locates archives.
pub struct ArchiveAcquirer {
    client: Client,
}

impl ArchiveAcquirer {
    /// Build an acquirer whose connect and read phases are bounded by `timeout`.
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(network::USER_AGENT)
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("HTTP client build failed: {}", e)))?;

        Ok(Self { client })
    }

    /// Produce a local archive path for `source`.
    ///
    /// Remote archives land at [`WorkingArea::archive_path`]; local ones are
    /// referenced where they are.
    pub async fn acquire(&self, source: &Source, area: &WorkingArea) -> Result<PathBuf, AcquisitionError> {
        match source {
            Source::InlineFileUrl(raw) => existing(Source::inline_path(raw)),
            Source::LocalPath(path) => existing(path.clone()),
            Source::RemoteUrl(raw) => {
                let url = parse_remote(raw)?;
                let destination = area.archive_path();
                self.download(&url, &destination).await?;
                Ok(destination)
            }
        }
    }

    /// Stream `url` into `destination` without buffering the whole body.
    async fn download(&self, url: &Url, destination: &Path) -> Result<u64, AcquisitionError> {
        log::info!("📥 Downloading ZIP from: {}", url);

        let network_failure = |source: reqwest::Error| AcquisitionError::NetworkFailure {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(network_failure)?;

        let mut file = fs_err::File::create(destination)?;
        let mut written: u64 = 0;

        let mut stream = response.bytes_stream();
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(network_failure)?;
            file.write_all(&chunk)?;
            written += chunk.len() as u64;
        }

        file.flush()?;

        log::info!(
            "✅ Saved ZIP: {} ({:.2} MB)",
            destination.display(),
            written as f64 / (1024.0 * 1024.0)
        );

        Ok(written)
    }
}

fn existing(path: PathBuf) -> Result<PathBuf, AcquisitionError> {
    if path.exists() {
        Ok(path)
    } else {
        Err(AcquisitionError::NotFound(path))
    }
}

fn parse_remote(raw: &str) -> Result<Url, AcquisitionError> {
    let url = Url::parse(raw).map_err(|e| AcquisitionError::InvalidScheme(format!("{} ({})", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(AcquisitionError::InvalidScheme(raw.to_string())),
    }
}
