// Run report - JSON summary of a complete pipeline run

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::detect_interactor::DetectReport;
use crate::app::merge_interactor::MergeReport;
use crate::engine::SpliceReport;
use crate::error::CatClipResult;
use crate::output::writer::write_atomic;

/// Summary written next to the final video after `run`
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub detect: DetectReport,
    pub merge: MergeReport,
    pub splice: SpliceReport,
    pub output_path: PathBuf,
    /// Work directory removed after success
    pub cleaned_up: bool,
}

impl RunReport {
    pub fn to_json(&self) -> CatClipResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> CatClipResult<()> {
        write_atomic(path, self.to_json()?.as_bytes())
    }
}
