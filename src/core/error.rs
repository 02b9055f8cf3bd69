use thiserror::Error;

use crate::download::acquire::AcquisitionError;
use crate::download::classify::ClassifyError;
use crate::download::distribute::DistributeError;
use crate::download::extract::ExtractError;

/// Centralized error types for the application
///
/// Every stage error converts into this enum so the pipeline can carry a
/// single cause type in its per-source outcome. Uses `thiserror` for
/// automatic error conversion and display formatting.
///
/// # Example
///
/// ```no_run
/// use zipreel::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Archive could not be obtained (missing file, bad scheme, network)
    #[error("Acquisition error: {0}")]
    Acquisition(#[from] AcquisitionError),

    /// Archive could not be unpacked
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractError),

    /// Extracted tree could not be walked
    #[error("Classification error: {0}")]
    Classification(#[from] ClassifyError),

    /// Copy or launch failure for a single media file
    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributeError),

    /// IO errors (work area creation, output directory)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid runtime configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Short category name used in log lines and batch summaries.
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Acquisition(e) => e.kind(),
            AppError::Extraction(e) => e.kind(),
            AppError::Classification(_) => "ClassifyFailure",
            AppError::Distribution(e) => e.kind(),
            AppError::Io(_) => "IoFailure",
            AppError::Config(_) => "ConfigFailure",
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
