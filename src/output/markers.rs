//! Stage completion markers

use std::path::{Path, PathBuf};

use crate::error::CatClipResult;
use crate::output::writer::write_atomic;

/// Pipeline stage that leaves a marker when finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Detect,
    Merge,
}

impl Stage {
    fn file_name(self) -> &'static str {
        match self {
            Stage::Detect => "detect.ok",
            Stage::Merge => "merge.ok",
        }
    }
}

/// Empty file whose existence means a stage completed
#[derive(Debug, Clone)]
pub struct CompletionMarker {
    stage: Stage,
    path: PathBuf,
}

impl CompletionMarker {
    pub fn new(work_dir: &Path, stage: Stage) -> Self {
        Self {
            stage,
            path: work_dir.join(stage.file_name()),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create the marker; call only after every stage output is durable
    pub fn write(&self) -> CatClipResult<()> {
        write_atomic(&self.path, b"")
    }

    /// Remove the marker if present
    pub fn clear(&self) -> CatClipResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
