//! ArchiveExtractor: unpacks a ZIP into a work area.
//!
//! Directory structure inside the archive is preserved. Entries whose names
//! would land outside the destination (`../`, absolute paths) are skipped
//! and reported instead of being written.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

/// Why an archive could not be unpacked.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Not a well-formed ZIP container
    #[error("{} is not a valid zip archive: {source}", path.display())]
    CorruptArchive {
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    /// Any other IO problem (disk full, permission denied, ...)
    #[error("Error extracting {}: {source}", path.display())]
    ExtractionFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExtractError {
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::CorruptArchive { .. } => "CorruptArchive",
            ExtractError::ExtractionFailure { .. } => "ExtractionFailure",
        }
    }

    fn failure(path: &Path, source: io::Error) -> Self {
        ExtractError::ExtractionFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    fn from_zip(path: &Path, err: ZipError) -> Self {
        match err {
            ZipError::Io(source) => Self::from_io(path, source),
            other => ExtractError::CorruptArchive {
                path: path.to_path_buf(),
                source: other,
            },
        }
    }

    /// Decompression and checksum problems surface as `InvalidData`.
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::InvalidData {
            ExtractError::CorruptArchive {
                path: path.to_path_buf(),
                source: ZipError::Io(source),
            }
        } else {
            Self::failure(path, source)
        }
    }
}

/// What an extraction pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Regular files written
    pub files: usize,
    /// Directory entries created
    pub directories: usize,
    /// Raw names of entries refused because they escape the destination
    pub skipped_entries: Vec<String>,
}

/// Unpack every entry of `archive_path` under `destination`.
pub fn extract(archive_path: &Path, destination: &Path) -> Result<ExtractionSummary, ExtractError> {
    log::info!("🗜  Extracting {}...", archive_path.display());

    let file = fs_err::File::open(archive_path).map_err(|e| ExtractError::failure(archive_path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| ExtractError::from_zip(archive_path, e))?;

    fs_err::create_dir_all(destination).map_err(|e| ExtractError::failure(archive_path, e))?;

    let mut summary = ExtractionSummary::default();

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| ExtractError::from_zip(archive_path, e))?;

        let Some(relative) = entry.enclosed_name() else {
            log::warn!("⚠️  Skipping unsafe archive entry: {}", entry.name());
            summary.skipped_entries.push(entry.name().to_string());
            continue;
        };
        let target = destination.join(relative);

        if entry.is_dir() {
            fs_err::create_dir_all(&target).map_err(|e| ExtractError::failure(archive_path, e))?;
            summary.directories += 1;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs_err::create_dir_all(parent).map_err(|e| ExtractError::failure(archive_path, e))?;
        }

        let mut out = fs_err::File::create(&target).map_err(|e| ExtractError::failure(archive_path, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| ExtractError::from_io(archive_path, e))?;
        summary.files += 1;
    }

    log::info!(
        "✅ Extracted to: {} ({} file(s))",
        destination.display(),
        summary.files
    );

    Ok(summary)
}

/// [`extract`] on the blocking pool, awaited in place.
pub async fn extract_blocking(archive_path: PathBuf, destination: PathBuf) -> Result<ExtractionSummary, ExtractError> {
    let path_for_error = archive_path.clone();
    tokio::task::spawn_blocking(move || extract(&archive_path, &destination))
        .await
        .map_err(|e| ExtractError::failure(&path_for_error, io::Error::other(e)))?
}
