//! Persisted pipeline artifacts
//!
//! Everything a run leaves on disk lives under the work directory inside the
//! output directory: the timestamps and fragment tables, the resume ledger,
//! stage markers and cut fragments. Only the final video sits next to it.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::domain::config::PathsConfig;

pub mod ledger;
pub mod markers;
pub mod store;
pub mod table;
pub mod writer;

pub use ledger::ResumeLedger;
pub use markers::{CompletionMarker, Stage};
pub use store::IntervalStore;

/// Resolved paths of every artifact for one output directory
#[derive(Debug, Clone, PartialEq)]
pub struct WorkLayout {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub work_dir: PathBuf,
    pub frags_dir: PathBuf,
    pub timestamps: PathBuf,
    pub merged_timestamps: PathBuf,
    pub processed_log: PathBuf,
    /// Post-processing settings the fragment table was built with
    pub merge_settings: PathBuf,
    pub final_video: PathBuf,
    pub report: PathBuf,
}

impl WorkLayout {
    pub fn new(paths: &PathsConfig) -> Self {
        let work_dir = paths.output_dir.join(&paths.work_dir_name);
        Self {
            input_dir: paths.input_dir.clone(),
            output_dir: paths.output_dir.clone(),
            frags_dir: work_dir.join("frags"),
            timestamps: work_dir.join(&paths.timestamps_name),
            merged_timestamps: work_dir.join(&paths.merged_timestamps_name),
            processed_log: work_dir.join(&paths.processed_log_name),
            merge_settings: work_dir.join("merge_settings.json"),
            final_video: paths.output_dir.join(&paths.final_video_name),
            report: paths.output_dir.join("catclip_report.json"),
            work_dir,
        }
    }

    /// Marker file for a stage
    pub fn marker(&self, stage: Stage) -> CompletionMarker {
        CompletionMarker::new(&self.work_dir, stage)
    }

    /// Source video path for a stored video id
    pub fn source_video(&self, video_id: &str) -> PathBuf {
        self.input_dir.join(video_id)
    }

    /// Create the work and fragment directories
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.frags_dir)
    }

    /// Remove cut fragment clips, keeping detect stills; returns how many
    /// files were removed
    pub fn clear_fragment_clips(&self) -> std::io::Result<usize> {
        if !self.frags_dir.is_dir() {
            return Ok(0);
        }
        let mut removed = 0;
        for entry in WalkDir::new(&self.frags_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            let name = entry.file_name().to_string_lossy();
            if entry.file_type().is_file() && name.starts_with("frag_") && name.ends_with(".mp4") {
                std::fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Remove the work directory and everything in it
    pub fn clear_work_dir(&self) -> std::io::Result<()> {
        remove_dir_if_exists(&self.work_dir)
    }
}

fn remove_dir_if_exists(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_dir_all(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
