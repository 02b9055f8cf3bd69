//! zipreel - fetch ZIP archives and distribute the videos inside
//!
//! Each source (remote URL, local path or `file://` URI) is acquired into a
//! private work area, unpacked, scanned for video files, and the videos are
//! then saved to the output directory and/or opened with the host's default
//! media application.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging
//! - `download`: source resolution and the acquire → extract → classify → distribute pipeline
//! - `cli`: command-line arguments

pub mod cli;
pub mod core;
pub mod download;

// Re-export commonly used types for convenience
pub use crate::core::error::{AppError, AppResult};
pub use download::pipeline::{BatchReport, PipelineConfig, PipelineOrchestrator, SourceOutcome, Stage};
pub use download::resolver::{Resolution, ResolverInputs, SourceResolver};
pub use download::source::{Mode, Source};
