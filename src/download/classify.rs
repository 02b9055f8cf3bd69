//! MediaClassifier: finds video files in an extracted tree by name.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::core::config::media::VIDEO_EXTENSIONS;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Failed to walk {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// A video discovered inside a work area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    path: PathBuf,
}

impl MediaFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name, used as the name of the saved copy.
    pub fn file_name(&self) -> Option<&OsStr> {
        self.path.file_name()
    }
}

/// Case-insensitive suffix match against the recognized extensions.
pub fn is_video(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(OsStr::to_str) else {
        return false;
    };
    let name = name.to_ascii_lowercase();
    VIDEO_EXTENSIONS
        .iter()
        .any(|ext| name.strip_suffix(*ext).is_some_and(|stem| stem.ends_with('.')))
}

/// Every video file under `root`, in file-name order per directory.
pub fn classify(root: &Path) -> Result<Vec<MediaFile>, ClassifyError> {
    let mut found = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| ClassifyError::Walk {
            root: root.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_file() && is_video(entry.path()) {
            found.push(MediaFile::new(entry.into_path()));
        }
    }

    log::debug!("Classified {} video file(s) under {}", found.len(), root.display());
    Ok(found)
}
