//! Pipeline orchestrator.
//!
//! Runs every source through
//!   create work area → acquire → extract → classify → distribute → release work area
//! strictly one source at a time. A failing stage ends that source only; the
//! batch always moves on to the next one.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::core::config::network;
use crate::core::error::{AppError, AppResult};
use crate::download::acquire::ArchiveAcquirer;
use crate::download::classify::classify;
use crate::download::distribute::{DistributionOutcome, Distributor, MediaOpener, SystemOpener};
use crate::download::extract::extract_blocking;
use crate::download::source::{Mode, Source};
use crate::download::workspace::{WorkAreaRetention, WorkingArea};

/// Stages a source moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Acquiring,
    Extracting,
    Classifying,
    Distributing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Acquiring => "acquiring",
            Stage::Extracting => "extracting",
            Stage::Classifying => "classifying",
            Stage::Distributing => "distributing",
        };
        f.write_str(name)
    }
}

/// Everything the orchestrator needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Durable destination for saved videos
    pub output_dir: PathBuf,
    /// What to do with each video
    pub mode: Mode,
    /// Keep or remove work areas afterwards
    pub retention: WorkAreaRetention,
    /// Parent of the work areas (`None` = system temp dir)
    pub work_root: Option<PathBuf>,
    /// Connect/read timeout for remote archives
    pub download_timeout: Duration,
}

impl PipelineConfig {
    pub fn new(output_dir: impl Into<PathBuf>, mode: Mode) -> Self {
        Self {
            output_dir: output_dir.into(),
            mode,
            retention: WorkAreaRetention::default(),
            work_root: None,
            download_timeout: network::timeout(),
        }
    }

    /// Sets the work area retention policy.
    #[must_use]
    pub fn retention(mut self, retention: WorkAreaRetention) -> Self {
        self.retention = retention;
        self
    }

    /// Sets the parent directory for work areas.
    #[must_use]
    pub fn work_root(mut self, root: Option<PathBuf>) -> Self {
        self.work_root = root;
        self
    }

    /// Sets the remote download timeout.
    #[must_use]
    pub fn download_timeout(mut self, timeout: Duration) -> Self {
        self.download_timeout = timeout;
        self
    }
}

/// Terminal state of one source.
#[derive(Debug)]
pub enum SourceOutcome {
    /// At least one video found; per-file results inside
    Completed(Vec<DistributionOutcome>),
    /// Archive processed, but nothing in it looked like a video
    NoMedia,
    /// A stage failed; later stages were not attempted
    Failed { stage: Stage, error: AppError },
}

impl SourceOutcome {
    fn failed(stage: Stage, error: impl Into<AppError>) -> Self {
        SourceOutcome::Failed {
            stage,
            error: error.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SourceOutcome::Failed { .. })
    }

    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            SourceOutcome::Failed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    pub fn distributions(&self) -> &[DistributionOutcome] {
        match self {
            SourceOutcome::Completed(outcomes) => outcomes,
            _ => &[],
        }
    }

    /// Whether any file handed to the opener lives under `dir`.
    pub fn opened_within(&self, dir: &Path) -> bool {
        self.distributions()
            .iter()
            .filter_map(|d| d.opened.as_deref())
            .any(|opened| opened.starts_with(dir))
    }
}

/// Outcome of one source plus where its work area ended up.
#[derive(Debug)]
pub struct SourceReport {
    pub source: Source,
    pub outcome: SourceOutcome,
    /// Set when the work area was kept on disk
    pub retained_work_area: Option<PathBuf>,
}

/// All source reports of a run, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub reports: Vec<SourceReport>,
}

impl BatchReport {
    pub fn completed(&self) -> usize {
        self.count(|o| matches!(o, SourceOutcome::Completed(_)))
    }

    pub fn no_media(&self) -> usize {
        self.count(|o| matches!(o, SourceOutcome::NoMedia))
    }

    pub fn failed(&self) -> usize {
        self.count(SourceOutcome::is_failed)
    }

    pub fn files_saved(&self) -> usize {
        self.distributions().filter(|d| d.saved_to.is_some()).count()
    }

    pub fn files_opened(&self) -> usize {
        self.distributions().filter(|d| d.opened.is_some()).count()
    }

    fn count(&self, predicate: impl Fn(&SourceOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| predicate(&r.outcome)).count()
    }

    fn distributions(&self) -> impl Iterator<Item = &DistributionOutcome> {
        self.reports.iter().flat_map(|r| r.outcome.distributions())
    }

    pub fn log_summary(&self) {
        log::info!(
            "📊 Batch finished: {} source(s), {} completed, {} without media, {} failed; {} file(s) saved, {} opened",
            self.reports.len(),
            self.completed(),
            self.no_media(),
            self.failed(),
            self.files_saved(),
            self.files_opened()
        );
    }
}

/// Sequences the stages for each source.
pub struct PipelineOrchestrator {
    config: PipelineConfig,
    acquirer: ArchiveAcquirer,
    distributor: Distributor,
}

impl PipelineOrchestrator {
    /// Orchestrator that opens media with the host's default application.
    pub fn new(config: PipelineConfig) -> AppResult<Self> {
        Self::with_opener(config, Arc::new(SystemOpener))
    }

    /// Orchestrator with a custom opener. Creates the output directory.
    pub fn with_opener(config: PipelineConfig, opener: Arc<dyn MediaOpener>) -> AppResult<Self> {
        let acquirer = ArchiveAcquirer::new(config.download_timeout)?;
        let distributor = Distributor::new(config.output_dir.clone(), opener);
        distributor.ensure_output_dir()?;

        Ok(Self {
            config,
            acquirer,
            distributor,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process every source in order. Failures are recorded, never propagated.
    pub async fn run_batch(&self, sources: &[Source]) -> BatchReport {
        let mut batch = BatchReport::default();
        for source in sources {
            batch.reports.push(self.run_source(source).await);
        }
        batch.log_summary();
        batch
    }

    /// Process one source from a fresh work area to a terminal outcome.
    pub async fn run_source(&self, source: &Source) -> SourceReport {
        log::info!("📦 Processing: {}", source);

        let area = match WorkingArea::create(self.config.work_root.as_deref()) {
            Ok(area) => area,
            Err(e) => {
                let outcome = SourceOutcome::failed(Stage::Acquiring, e);
                log_outcome(source, &outcome);
                return SourceReport {
                    source: source.clone(),
                    outcome,
                    retained_work_area: None,
                };
            }
        };

        let outcome = self.run_stages(source, &area).await;
        log_outcome(source, &outcome);

        // The viewer is launched detached and may still be reading the file.
        let retention = if outcome.opened_within(area.path()) {
            log::info!("🗂  Keeping work area, a video in it was opened: {}", area.path().display());
            WorkAreaRetention::Keep
        } else {
            self.config.retention
        };

        SourceReport {
            source: source.clone(),
            outcome,
            retained_work_area: area.finish(retention),
        }
    }

    async fn run_stages(&self, source: &Source, area: &WorkingArea) -> SourceOutcome {
        log::debug!("{}: {}", source, Stage::Acquiring);
        let archive = match self.acquirer.acquire(source, area).await {
            Ok(path) => path,
            Err(e) => return SourceOutcome::failed(Stage::Acquiring, e),
        };

        log::debug!("{}: {}", source, Stage::Extracting);
        let extract_dir = area.extract_dir();
        match extract_blocking(archive, extract_dir.clone()).await {
            Ok(summary) if !summary.skipped_entries.is_empty() => {
                log::warn!(
                    "⚠️  Skipped {} unsafe archive entries in {}",
                    summary.skipped_entries.len(),
                    source
                );
            }
            Ok(_) => {}
            Err(e) => return SourceOutcome::failed(Stage::Extracting, e),
        }

        log::debug!("{}: {}", source, Stage::Classifying);
        let media = match run_blocking(move || classify(&extract_dir)).await {
            Ok(Ok(media)) => media,
            Ok(Err(e)) => return SourceOutcome::failed(Stage::Classifying, e),
            Err(e) => return SourceOutcome::failed(Stage::Classifying, e),
        };

        if media.is_empty() {
            return SourceOutcome::NoMedia;
        }
        log::info!("🎞  Found {} video file(s)", media.len());

        log::debug!("{}: {}", source, Stage::Distributing);
        let distributor = self.distributor.clone();
        let mode = self.config.mode;
        let distributed = run_blocking(move || {
            media
                .iter()
                .map(|file| distributor.distribute(file, mode))
                .collect::<Vec<_>>()
        })
        .await;

        match distributed {
            Ok(outcomes) => SourceOutcome::Completed(outcomes),
            Err(e) => SourceOutcome::failed(Stage::Distributing, e),
        }
    }
}

/// Run filesystem-bound work on the blocking pool and wait for it.
async fn run_blocking<T, F>(work: F) -> io::Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(io::Error::other)
}

fn log_outcome(source: &Source, outcome: &SourceOutcome) {
    match outcome {
        SourceOutcome::Completed(outcomes) => {
            let problems = outcomes.iter().filter(|o| !o.is_clean()).count();
            if problems == 0 {
                log::info!("✅ Done: {}", source);
            } else {
                log::warn!("⚠️  Done with {} file problem(s): {}", problems, source);
            }
        }
        SourceOutcome::NoMedia => log::warn!("⚠️  No video files found in the ZIP: {}", source),
        SourceOutcome::Failed { stage, error } => {
            log::error!("❌ [{}] {} failed while {}: {}", error.category(), source, stage, error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::classify::MediaFile;

    #[test]
    fn test_config_builder() {
        let config = PipelineConfig::new("/tmp/out", Mode::PlayOnly)
            .retention(WorkAreaRetention::Keep)
            .work_root(Some(PathBuf::from("/tmp/work")))
            .download_timeout(Duration::from_secs(5));

        assert_eq!(config.mode, Mode::PlayOnly);
        assert_eq!(config.retention, WorkAreaRetention::Keep);
        assert_eq!(config.work_root, Some(PathBuf::from("/tmp/work")));
        assert_eq!(config.download_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_config_defaults() {
        let config = PipelineConfig::new("downloads", Mode::Both);
        assert_eq!(config.retention, WorkAreaRetention::Cleanup);
        assert_eq!(config.work_root, None);
        assert_eq!(config.download_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Acquiring.to_string(), "acquiring");
        assert_eq!(Stage::Distributing.to_string(), "distributing");
    }

    #[test]
    fn test_empty_batch_report() {
        let report = BatchReport::default();
        assert_eq!(report.completed(), 0);
        assert_eq!(report.failed(), 0);
        assert_eq!(report.files_saved(), 0);
    }

    #[test]
    fn test_outcome_helpers() {
        let failed = SourceOutcome::failed(Stage::Extracting, io::Error::other("x"));
        assert!(failed.is_failed());
        assert_eq!(failed.failed_stage(), Some(Stage::Extracting));
        assert!(failed.distributions().is_empty());
        assert_eq!(SourceOutcome::NoMedia.failed_stage(), None);
    }

    #[test]
    fn test_opened_within_checks_opened_paths_only() {
        let area = Path::new("/tmp/zipreel-abc");
        let mut inside = DistributionOutcome::new(&MediaFile::new(area.join("extracted/a.mp4")));
        inside.opened = Some(area.join("extracted/a.mp4"));
        let mut saved = DistributionOutcome::new(&MediaFile::new(area.join("extracted/b.mp4")));
        saved.saved_to = Some(PathBuf::from("/out/b.mp4"));
        saved.opened = Some(PathBuf::from("/out/b.mp4"));

        assert!(SourceOutcome::Completed(vec![inside]).opened_within(area));
        assert!(!SourceOutcome::Completed(vec![saved]).opened_within(area));
        assert!(!SourceOutcome::NoMedia.opened_within(area));
    }
}
