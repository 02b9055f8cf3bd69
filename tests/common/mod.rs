//! Common test utilities
//!
//! This module is shared across all integration tests

pub mod fixtures;
pub mod opener;

#[allow(unused_imports)]
pub use fixtures::{write_zip, zip_bytes, TestEnvironment};
#[allow(unused_imports)]
pub use opener::RecordingOpener;
