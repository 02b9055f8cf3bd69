//! Test fixtures for pipeline tests
//!
//! Provides TestEnvironment, a throwaway directory tree with:
//! - an output directory (the run's `downloads/`)
//! - a work root, so tests can see which work areas survive
//! - a place to drop input archives

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;
use zipreel::download::workspace::WorkAreaRetention;
use zipreel::{Mode, PipelineConfig};

/// Build an in-memory ZIP. Names ending in `/` become directory entries.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, SimpleFileOptions::default()).unwrap();
        } else {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Write a ZIP with `entries` to `path`.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
    std::fs::write(path, zip_bytes(entries)).unwrap();
    path.to_path_buf()
}

pub struct TestEnvironment {
    root: TempDir,
    pub output_dir: PathBuf,
    pub work_root: PathBuf,
    pub inputs: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let output_dir = root.path().join("downloads");
        let work_root = root.path().join("work");
        let inputs = root.path().join("inputs");
        std::fs::create_dir_all(&inputs).unwrap();

        Self {
            root,
            output_dir,
            work_root,
            inputs,
        }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Pipeline config rooted in this environment, work areas cleaned up.
    pub fn config(&self, mode: Mode) -> PipelineConfig {
        PipelineConfig::new(&self.output_dir, mode).work_root(Some(self.work_root.clone()))
    }

    /// Same as [`config`](Self::config) but work areas are kept.
    pub fn config_keeping_work(&self, mode: Mode) -> PipelineConfig {
        self.config(mode).retention(WorkAreaRetention::Keep)
    }

    /// Write an input archive and return its path.
    pub fn archive(&self, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
        write_zip(&self.inputs.join(name), entries)
    }

    /// Names of files currently in the output directory, sorted.
    pub fn output_files(&self) -> Vec<String> {
        let mut names: Vec<String> = match std::fs::read_dir(&self.output_dir) {
            Ok(entries) => entries
                .flatten()
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    /// Number of work areas left under the work root.
    pub fn work_areas(&self) -> usize {
        std::fs::read_dir(&self.work_root).map(|e| e.count()).unwrap_or(0)
    }
}
