//! Distributor: saves discovered videos and/or opens them.
//!
//! Saved copies go to the output directory under their base name. Two files
//! with the same name from different archive folders collide and the later
//! one overwrites the earlier.
//!
//! Opening is fire-and-forget: the media application is launched detached,
//! never awaited, and a launch failure is only a warning.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::download::classify::MediaFile;
use crate::download::source::Mode;

/// Hands a file to whatever the host uses to open media.
pub trait MediaOpener: Send + Sync {
    /// Start opening `path` and return without waiting for the viewer.
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// The host's default opener (`xdg-open`, `open`, `start`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl MediaOpener for SystemOpener {
    fn open(&self, path: &Path) -> io::Result<()> {
        open::that_detached(path)
    }
}

/// Per-file distribution problems. Never fatal for the batch.
#[derive(Debug, Error)]
pub enum DistributeError {
    #[error("Failed to save {} -> {}: {source}", from.display(), to.display())]
    CopyFailure {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not play video automatically: {}: {source}", path.display())]
    LaunchFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DistributeError {
    pub fn kind(&self) -> &'static str {
        match self {
            DistributeError::CopyFailure { .. } => "CopyFailure",
            DistributeError::LaunchFailure { .. } => "LaunchFailure",
        }
    }
}

/// What happened to one media file.
#[derive(Debug)]
pub struct DistributionOutcome {
    pub media: MediaFile,
    /// Destination of the saved copy, if the copy succeeded
    pub saved_to: Option<PathBuf>,
    /// Path handed to the opener, if the launch succeeded
    pub opened: Option<PathBuf>,
    pub failures: Vec<DistributeError>,
}

impl DistributionOutcome {
    pub(crate) fn new(media: &MediaFile) -> Self {
        Self {
            media: media.clone(),
            saved_to: None,
            opened: None,
            failures: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Clone)]
pub struct Distributor {
    output_dir: PathBuf,
    opener: Arc<dyn MediaOpener>,
}

impl Distributor {
    pub fn new(output_dir: impl Into<PathBuf>, opener: Arc<dyn MediaOpener>) -> Self {
        Self {
            output_dir: output_dir.into(),
            opener,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory if needed. Returns `true` when it was created.
    pub fn ensure_output_dir(&self) -> io::Result<bool> {
        if self.output_dir.is_dir() {
            return Ok(false);
        }
        fs_err::create_dir_all(&self.output_dir)?;
        log::info!("📁 Created download folder: {}", self.output_dir.display());
        Ok(true)
    }

    /// Where `media` is saved: its base name inside the output directory.
    pub fn destination_for(&self, media: &MediaFile) -> Option<PathBuf> {
        media.file_name().map(|name| self.output_dir.join(name))
    }

    /// Save and/or open one file according to `mode`.
    ///
    /// In `Both`, the saved copy is opened when the copy succeeded; otherwise
    /// the extracted original is opened.
    pub fn distribute(&self, media: &MediaFile, mode: Mode) -> DistributionOutcome {
        let mut outcome = DistributionOutcome::new(media);

        if mode.saves() {
            match self.save(media) {
                Ok(destination) => {
                    log::info!("✅ Saved: {}", destination.display());
                    outcome.saved_to = Some(destination);
                }
                Err(e) => {
                    log::error!("❌ {}", e);
                    outcome.failures.push(e);
                }
            }
        }

        if mode.plays() {
            let target = outcome
                .saved_to
                .clone()
                .unwrap_or_else(|| media.path().to_path_buf());

            log::info!("▶️  Playing: {}", target.display());
            match self.opener.open(&target) {
                Ok(()) => outcome.opened = Some(target),
                Err(source) => {
                    let e = DistributeError::LaunchFailure { path: target, source };
                    log::warn!("⚠️  {}", e);
                    outcome.failures.push(e);
                }
            }
        }

        outcome
    }

    fn save(&self, media: &MediaFile) -> Result<PathBuf, DistributeError> {
        let destination = self.destination_for(media).ok_or_else(|| DistributeError::CopyFailure {
            from: media.path().to_path_buf(),
            to: self.output_dir.clone(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "media path has no file name"),
        })?;

        fs_err::copy(media.path(), &destination).map_err(|source| DistributeError::CopyFailure {
            from: media.path().to_path_buf(),
            to: destination.clone(),
            source,
        })?;

        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        opened: Mutex<Vec<PathBuf>>,
    }

    impl MediaOpener for Recorder {
        fn open(&self, path: &Path) -> io::Result<()> {
            self.opened.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    struct Broken;

    impl MediaOpener for Broken {
        fn open(&self, _path: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no opener"))
        }
    }

    fn media_in(dir: &Path, name: &str, body: &[u8]) -> MediaFile {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        MediaFile::new(path)
    }

    #[test]
    fn test_download_only_copies_and_never_opens() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let recorder = Arc::new(Recorder::default());
        let distributor = Distributor::new(out.path(), recorder.clone());

        let media = media_in(src.path(), "clip.mp4", b"video-bytes");
        let outcome = distributor.distribute(&media, Mode::DownloadOnly);

        assert!(outcome.is_clean());
        assert_eq!(outcome.saved_to, Some(out.path().join("clip.mp4")));
        assert_eq!(std::fs::read(out.path().join("clip.mp4")).unwrap(), b"video-bytes");
        assert!(recorder.opened.lock().unwrap().is_empty());
    }

    #[test]
    fn test_both_opens_the_saved_copy() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let recorder = Arc::new(Recorder::default());
        let distributor = Distributor::new(out.path(), recorder.clone());

        let media = media_in(src.path(), "clip.mkv", b"mkv");
        let outcome = distributor.distribute(&media, Mode::Both);

        assert_eq!(outcome.opened, Some(out.path().join("clip.mkv")));
        assert_eq!(*recorder.opened.lock().unwrap(), vec![out.path().join("clip.mkv")]);
    }

    #[test]
    fn test_play_only_opens_original_without_copying() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let recorder = Arc::new(Recorder::default());
        let distributor = Distributor::new(out.path(), recorder.clone());

        let media = media_in(src.path(), "clip.webm", b"webm");
        let outcome = distributor.distribute(&media, Mode::PlayOnly);

        assert_eq!(outcome.saved_to, None);
        assert_eq!(outcome.opened.as_deref(), Some(media.path()));
        assert!(!out.path().join("clip.webm").exists());
    }

    #[test]
    fn test_copy_failure_falls_back_to_original_for_playback() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let recorder = Arc::new(Recorder::default());
        // output "directory" is a regular file, so the copy cannot succeed
        let bogus_out = out.path().join("not-a-dir");
        std::fs::write(&bogus_out, b"").unwrap();
        let distributor = Distributor::new(&bogus_out, recorder.clone());

        let media = media_in(src.path(), "clip.avi", b"avi");
        let outcome = distributor.distribute(&media, Mode::Both);

        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].kind(), "CopyFailure");
        assert_eq!(outcome.opened.as_deref(), Some(media.path()));
    }

    #[test]
    fn test_launch_failure_is_reported_not_fatal() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let distributor = Distributor::new(out.path(), Arc::new(Broken));

        let media = media_in(src.path(), "clip.mov", b"mov");
        let outcome = distributor.distribute(&media, Mode::Both);

        assert!(outcome.saved_to.is_some());
        assert_eq!(outcome.opened, None);
        assert_eq!(outcome.failures[0].kind(), "LaunchFailure");
    }

    #[test]
    fn test_same_name_overwrites() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let distributor = Distributor::new(out.path(), Arc::new(Recorder::default()));

        std::fs::create_dir_all(src.path().join("a")).unwrap();
        std::fs::create_dir_all(src.path().join("b")).unwrap();
        let first = media_in(&src.path().join("a"), "same.mp4", b"first");
        let second = media_in(&src.path().join("b"), "same.mp4", b"second");

        distributor.distribute(&first, Mode::DownloadOnly);
        distributor.distribute(&second, Mode::DownloadOnly);

        assert_eq!(std::fs::read(out.path().join("same.mp4")).unwrap(), b"second");
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_ensure_output_dir_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let distributor = Distributor::new(root.path().join("downloads"), Arc::new(SystemOpener));

        assert!(distributor.ensure_output_dir().unwrap());
        assert!(!distributor.ensure_output_dir().unwrap());
        assert!(root.path().join("downloads").is_dir());
    }
}
