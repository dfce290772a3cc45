// Merge interactor - Expands and merges stored intervals into fragments

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::config::{AppConfig, PostProcessConfig};
use crate::domain::model::Fragment;
use crate::domain::postprocess::postprocess;
use crate::error::{CatClipError, CatClipResult};
use crate::output::writer::write_atomic;
use crate::output::{table, Stage, WorkLayout};

/// Outcome of the merge stage
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeReport {
    pub intervals_read: usize,
    pub fragments: usize,
    pub stage_skipped: bool,
}

/// Interactor for the post-processing stage
pub struct MergeInteractor {
    layout: WorkLayout,
    postprocess: PostProcessConfig,
}

impl MergeInteractor {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            layout: WorkLayout::new(&config.paths),
            postprocess: config.postprocess,
        }
    }

    /// Turn the timestamps table into the fragment table.
    ///
    /// The stage is skipped only when `merge.ok`, the fragment table and
    /// matching settings are all present. Otherwise clips cut from the old
    /// table are removed, the table is replaced atomically and `merge.ok` is
    /// written after it.
    pub fn execute(&self) -> CatClipResult<MergeReport> {
        let marker = self.layout.marker(Stage::Merge);
        let complete = marker.exists() && self.layout.merged_timestamps.is_file();
        if complete && !self.settings_match() {
            info!("Merge settings changed, rebuilding the fragment table");
        } else if complete {
            info!("Merge already complete, skipping ({})", marker.path().display());
            let fragments = table::read(&self.layout.merged_timestamps)?;
            return Ok(MergeReport {
                intervals_read: 0,
                fragments: fragments.len(),
                stage_skipped: true,
            });
        }

        if !self.layout.timestamps.is_file() {
            return Err(CatClipError::NoUsableWork {
                message: format!(
                    "timestamps table {} not found, run detection first",
                    self.layout.timestamps.display()
                ),
            });
        }

        marker.clear()?;
        let removed = self.layout.clear_fragment_clips()?;
        if removed > 0 {
            info!("Removed {} clips cut from the previous fragment table", removed);
        }

        let intervals = table::read(&self.layout.timestamps)?;
        let fragments = postprocess(&intervals, &self.postprocess);
        table::write(&self.layout.merged_timestamps, &fragments)?;
        write_atomic(
            &self.layout.merge_settings,
            serde_json::to_string_pretty(&self.postprocess)?.as_bytes(),
        )?;
        marker.write()?;

        info!(
            "Merged {} intervals into {} fragments (gap {:.2}s, margins {:.2}s/{:.2}s)",
            intervals.len(),
            fragments.len(),
            self.postprocess.max_merge_gap,
            self.postprocess.pre_margin,
            self.postprocess.post_margin
        );
        Ok(MergeReport {
            intervals_read: intervals.len(),
            fragments: fragments.len(),
            stage_skipped: false,
        })
    }

    /// Whether the stored settings equal the current ones; unreadable or
    /// missing settings never match
    fn settings_match(&self) -> bool {
        let text = match std::fs::read_to_string(&self.layout.merge_settings) {
            Ok(text) => text,
            Err(_) => return false,
        };
        match serde_json::from_str::<PostProcessConfig>(&text) {
            Ok(stored) => stored == self.postprocess,
            Err(e) => {
                warn!("Ignoring unreadable {}: {}", self.layout.merge_settings.display(), e);
                false
            }
        }
    }

    /// Fragments from the last completed merge
    pub fn fragments(&self) -> CatClipResult<Vec<Fragment>> {
        table::read(&self.layout.merged_timestamps)
    }
}
