use std::sync::Arc;

use tracing::info;

use crate::adapters::{ExecClassifier, FfmpegTool, LibavOpener};
use crate::app::{DetectInteractor, MergeInteractor, RunInteractor, SpliceInteractor};
use crate::domain::config::AppConfig;
use crate::engine::PolicyTable;
use crate::error::CatClipResult;
use crate::output::WorkLayout;
use crate::ports::MediaTool;

/// Wires the default adapters into the interactors
pub struct DefaultAppContainer {
    config: AppConfig,
    media: Arc<FfmpegTool>,
}

impl DefaultAppContainer {
    pub fn new(config: &AppConfig) -> Self {
        let layout = WorkLayout::new(&config.paths);
        Self {
            config: config.clone(),
            media: Arc::new(FfmpegTool::new(&config.splice, &layout.work_dir)),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Fail early when ffmpeg cannot be launched
    pub fn check_media_tool(&self) -> CatClipResult<()> {
        self.media.check_available()?;
        info!("Using media tool {}", self.config.splice.ffmpeg);
        Ok(())
    }

    /// Detection interactor with the detector process already started
    pub fn detect_interactor(&self) -> CatClipResult<DetectInteractor> {
        let mut classifier = ExecClassifier::new(&self.config.detection);
        classifier.start()?;
        Ok(DetectInteractor::new(
            &self.config,
            Box::new(LibavOpener::new(self.config.detection.inference_width)),
            Box::new(classifier),
            Arc::clone(&self.media) as Arc<dyn MediaTool>,
        ))
    }

    pub fn merge_interactor(&self) -> MergeInteractor {
        MergeInteractor::new(&self.config)
    }

    pub fn splice_interactor(&self) -> SpliceInteractor {
        SpliceInteractor::new(
            &self.config,
            PolicyTable::default(),
            Arc::clone(&self.media) as Arc<dyn MediaTool>,
        )
    }

    pub fn run_interactor(&self) -> CatClipResult<RunInteractor> {
        Ok(RunInteractor::new(
            &self.config,
            self.detect_interactor()?,
            self.merge_interactor(),
            self.splice_interactor(),
        ))
    }
}
