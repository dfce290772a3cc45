//! Durable store of raw detection intervals

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::model::Interval;
use crate::error::CatClipResult;
use crate::output::table;

/// Interval table keyed by video id.
///
/// Storing a video replaces any rows it already had, so re-detecting a video
/// after an interrupted run never duplicates intervals.
#[derive(Debug, Clone)]
pub struct IntervalStore {
    path: PathBuf,
}

impl IntervalStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durably store all intervals of one video.
    ///
    /// Appends when the video has no rows yet, otherwise rewrites the table
    /// atomically with the old rows of that video replaced. Intervals that
    /// collapse at the table's two-decimal precision are dropped with a
    /// warning.
    pub fn append_intervals(&self, video_id: &str, intervals: &[Interval]) -> CatClipResult<()> {
        let intervals: Vec<Interval> = intervals
            .iter()
            .filter(|interval| {
                let keep = table::is_representable(interval);
                if !keep {
                    warn!(
                        video = %video_id,
                        start = interval.start,
                        end = interval.end,
                        "Dropping interval shorter than the table precision (0.01s)"
                    );
                }
                keep
            })
            .cloned()
            .collect();
        let intervals = intervals.as_slice();

        let existing = table::read(&self.path)?;
        if existing.iter().any(|row| row.video_id == video_id) {
            let mut rows: Vec<Interval> = existing
                .into_iter()
                .filter(|row| row.video_id != video_id)
                .collect();
            rows.extend_from_slice(intervals);
            info!(
                "Replacing stored intervals for {} ({} rows)",
                video_id,
                intervals.len()
            );
            return table::write(&self.path, &rows);
        }

        debug!("Storing {} intervals for {}", intervals.len(), video_id);
        if intervals.is_empty() && self.path.exists() {
            return Ok(());
        }
        table::append(&self.path, intervals)
    }

    /// All stored intervals in file order
    pub fn read_all(&self) -> CatClipResult<Vec<Interval>> {
        table::read(&self.path)
    }
}
