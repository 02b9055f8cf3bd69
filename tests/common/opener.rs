#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use zipreel::download::MediaOpener;

/// Media opener that records every request instead of launching anything.
#[derive(Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<PathBuf>>,
    fail: bool,
}

impl RecordingOpener {
    /// An opener whose every launch fails.
    pub fn failing() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().unwrap().clone()
    }
}

impl MediaOpener for RecordingOpener {
    fn open(&self, path: &Path) -> io::Result<()> {
        self.opened.lock().unwrap().push(path.to_path_buf());
        if self.fail {
            Err(io::Error::new(io::ErrorKind::NotFound, "xdg-open: not found"))
        } else {
            Ok(())
        }
    }
}
