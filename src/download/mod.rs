//! Source resolution and the archive → video pipeline

pub mod acquire;
pub mod classify;
pub mod distribute;
pub mod extract;
pub mod pipeline;
pub mod resolver;
pub mod source;
pub mod workspace;

// Re-exports for convenience
pub use acquire::{AcquisitionError, ArchiveAcquirer};
pub use classify::{classify, ClassifyError, MediaFile};
pub use distribute::{DistributeError, DistributionOutcome, Distributor, MediaOpener, SystemOpener};
pub use extract::{extract, ExtractError, ExtractionSummary};
pub use pipeline::{PipelineConfig, PipelineOrchestrator, SourceOutcome, SourceReport, Stage};
pub use resolver::{Resolution, ResolverInputs, SourceResolver, SourceProvider};
pub use source::{Mode, Source};
pub use workspace::{WorkAreaRetention, WorkingArea};
