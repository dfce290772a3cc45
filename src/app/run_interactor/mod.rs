// Run interactor - Detect, merge and splice in one go

use chrono::Utc;
use tracing::{info, warn};

use crate::app::detect_interactor::DetectInteractor;
use crate::app::merge_interactor::MergeInteractor;
use crate::app::report::RunReport;
use crate::app::splice_interactor::SpliceInteractor;
use crate::domain::config::AppConfig;
use crate::error::CatClipResult;
use crate::output::WorkLayout;

/// Interactor for the full pipeline
pub struct RunInteractor {
    layout: WorkLayout,
    detect: DetectInteractor,
    merge: MergeInteractor,
    splice: SpliceInteractor,
    delete_temp_files: bool,
}

impl RunInteractor {
    pub fn new(
        config: &AppConfig,
        detect: DetectInteractor,
        merge: MergeInteractor,
        splice: SpliceInteractor,
    ) -> Self {
        Self {
            layout: WorkLayout::new(&config.paths),
            detect,
            merge,
            splice,
            delete_temp_files: config.splice.delete_temp_files,
        }
    }

    /// Run every stage, clean up on success and write the run report
    pub fn execute(&mut self) -> CatClipResult<RunReport> {
        let started_at = Utc::now();

        let detect = self.detect.execute()?;
        let merge = self.merge.execute()?;
        let splice = self.splice.execute()?;

        let cleaned_up = if self.delete_temp_files {
            match self.layout.clear_work_dir() {
                Ok(()) => {
                    info!("Removed work directory {}", self.layout.work_dir.display());
                    true
                }
                Err(e) => {
                    warn!("Failed to remove work directory {}: {}", self.layout.work_dir.display(), e);
                    false
                }
            }
        } else {
            info!("Keeping work directory {}", self.layout.work_dir.display());
            false
        };

        let report = RunReport {
            started_at,
            finished_at: Utc::now(),
            output_path: splice.output_path.clone(),
            detect,
            merge,
            splice,
            cleaned_up,
        };
        report.write(&self.layout.report)?;
        info!("Run report written to {}", self.layout.report.display());
        Ok(report)
    }
}
