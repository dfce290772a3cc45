// Splice interactor - Cuts fragments and joins them into the final video

use std::sync::Arc;

use tracing::info;

use crate::domain::config::AppConfig;
use crate::engine::{PolicyTable, SpliceReport, Splicer};
use crate::error::{CatClipError, CatClipResult};
use crate::output::{table, WorkLayout};
use crate::ports::MediaTool;
use crate::utils::progress::ProgressFactory;

/// Interactor for the extraction stage
pub struct SpliceInteractor {
    layout: WorkLayout,
    policies: PolicyTable,
    media: Arc<dyn MediaTool>,
    progress: ProgressFactory,
}

impl SpliceInteractor {
    pub fn new(config: &AppConfig, policies: PolicyTable, media: Arc<dyn MediaTool>) -> Self {
        Self {
            layout: WorkLayout::new(&config.paths),
            policies,
            media,
            progress: ProgressFactory::new(config.display.progress),
        }
    }

    /// Extract every fragment of the fragment table and write the final video
    pub fn execute(&self) -> CatClipResult<SpliceReport> {
        if !self.layout.merged_timestamps.is_file() {
            return Err(CatClipError::NoUsableWork {
                message: format!(
                    "fragment table {} not found, run merge first",
                    self.layout.merged_timestamps.display()
                ),
            });
        }
        let fragments = table::read(&self.layout.merged_timestamps)?;
        if fragments.is_empty() {
            return Err(CatClipError::NoUsableWork {
                message: "no fragments to extract".to_string(),
            });
        }

        info!("Extracting {} fragments", fragments.len());
        let splicer = Splicer::new(
            self.media.as_ref(),
            self.policies,
            &self.layout.input_dir,
            &self.layout.frags_dir,
        )
        .with_progress(self.progress);
        let report = splicer.splice(&fragments, &self.layout.final_video)?;
        info!(
            "Final video written to {} ({} cut, {} reused, {} skipped, concat {})",
            report.output_path.display(),
            report.fragments_cut,
            report.fragments_reused,
            report.fragments_skipped,
            report.concat_method
        );
        Ok(report)
    }
}
