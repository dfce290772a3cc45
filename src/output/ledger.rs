//! Resume ledger of fully processed videos

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CatClipResult;
use crate::output::writer::append_durable;

/// Append-only list of video ids, one per line.
///
/// An id is appended only after the video's intervals are durably stored, so
/// a crash never leaves an id listed without its rows.
#[derive(Debug)]
pub struct ResumeLedger {
    path: PathBuf,
    done: HashSet<String>,
}

impl ResumeLedger {
    /// Load the ledger, treating a missing file as empty
    pub fn open(path: &Path) -> CatClipResult<Self> {
        let done = match std::fs::read_to_string(path) {
            Ok(text) => text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Ledger {} lists {} videos", path.display(), done.len());
        Ok(Self {
            path: path.to_path_buf(),
            done,
        })
    }

    pub fn is_done(&self, video_id: &str) -> bool {
        self.done.contains(video_id)
    }

    /// Record a video as processed; durable when this returns
    pub fn mark_done(&mut self, video_id: &str) -> CatClipResult<()> {
        if self.done.contains(video_id) {
            return Ok(());
        }
        append_durable(&self.path, format!("{}\n", video_id).as_bytes())?;
        self.done.insert(video_id.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.done.is_empty()
    }
}
