//! Per-source ephemeral work areas.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};

use crate::core::config::storage;

/// What happens to a work area once its source is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkAreaRetention {
    /// Delete the directory tree
    #[default]
    Cleanup,
    /// Leave it on disk for inspection
    Keep,
}

impl WorkAreaRetention {
    pub fn from_flag(keep: bool) -> Self {
        if keep {
            WorkAreaRetention::Keep
        } else {
            WorkAreaRetention::Cleanup
        }
    }

    pub fn keeps(self) -> bool {
        self == WorkAreaRetention::Keep
    }
}

/// Exclusively owned scratch directory for one source.
///
/// Holds the downloaded archive (for remote sources) and the extracted tree.
/// A new area is created for every source; areas are never shared.
#[derive(Debug)]
pub struct WorkingArea {
    dir: TempDir,
}

impl WorkingArea {
    /// Create a fresh area under `root`, or under the system temp dir.
    pub fn create(root: Option<&Path>) -> io::Result<Self> {
        let mut builder = Builder::new();
        builder.prefix(storage::WORK_AREA_PREFIX);

        let dir = match root {
            Some(root) => {
                fs_err::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };

        log::debug!("Created work area {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Where a remote archive is streamed to.
    pub fn archive_path(&self) -> PathBuf {
        self.path().join(storage::ARCHIVE_FILE_NAME)
    }

    /// Where archive contents are unpacked.
    pub fn extract_dir(&self) -> PathBuf {
        self.path().join(storage::EXTRACT_DIR_NAME)
    }

    /// Release the area. Returns the retained path when kept.
    pub fn finish(self, retention: WorkAreaRetention) -> Option<PathBuf> {
        match retention {
            WorkAreaRetention::Keep => {
                let path = self.dir.keep();
                log::info!("🗂  Work area kept: {}", path.display());
                Some(path)
            }
            WorkAreaRetention::Cleanup => {
                let path = self.path().to_path_buf();
                if let Err(e) = self.dir.close() {
                    log::warn!("⚠️  Failed to remove work area {}: {}", path.display(), e);
                }
                None
            }
        }
    }
}
