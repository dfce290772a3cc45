//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::config_initialization::ConfigOverrides;
use crate::error::CatClipResult;
use crate::planner::SamplingPolicy;

/// Sampling mode selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SamplingMode {
    /// Step depends on whether a cat was just seen
    Adaptive,
    /// Fixed cadence with batched inference
    Fixed,
}

/// Arguments shared by every pipeline command
#[derive(Args, Debug, Clone, Default)]
pub struct PipelineArgs {
    /// Directory holding the source videos
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Directory for the work files and the final video
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Detection confidence threshold (0-1)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Detector model weights
    #[arg(long)]
    pub model: Option<String>,

    /// Largest gap in seconds bridged when merging intervals
    #[arg(long)]
    pub merge_gap: Option<f64>,

    /// Discard previous progress and rescan everything
    #[arg(long)]
    pub force: bool,

    /// Keep the work directory after a successful run
    #[arg(long)]
    pub no_clean: bool,

    /// Save a still at every interval start and end
    #[arg(long)]
    pub save_detect_frames: bool,

    /// Frame sampling policy; the configured steps are kept when the mode
    /// is unchanged
    #[arg(long, value_enum)]
    pub sampling: Option<SamplingMode>,

    /// Hide progress bars
    #[arg(long)]
    pub no_progress: bool,
}

impl PipelineArgs {
    /// Overrides for the configuration hierarchy; unset flags leave lower
    /// layers alone
    pub fn config_overrides(&self) -> CatClipResult<ConfigOverrides> {
        let sampling = match self.sampling {
            Some(SamplingMode::Adaptive) => Some(SamplingPolicy::from_name("adaptive")?),
            Some(SamplingMode::Fixed) => Some(SamplingPolicy::from_name("fixed")?),
            None => None,
        };
        Ok(ConfigOverrides {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            confidence_threshold: self.threshold,
            max_merge_gap: self.merge_gap,
            model_path: self.model.clone(),
            ffmpeg: None,
            save_detect_frames: self.save_detect_frames.then_some(true),
            sampling,
            delete_temp_files: self.no_clean.then_some(false),
            progress: self.no_progress.then_some(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_flags_do_not_override() {
        let overrides = PipelineArgs::default().config_overrides().unwrap();
        assert_eq!(overrides, ConfigOverrides::default());
    }

    #[test]
    fn test_flags_map_to_overrides() {
        let args = PipelineArgs {
            threshold: Some(0.5),
            merge_gap: Some(3.0),
            no_clean: true,
            save_detect_frames: true,
            sampling: Some(SamplingMode::Fixed),
            no_progress: true,
            ..PipelineArgs::default()
        };
        let overrides = args.config_overrides().unwrap();
        assert_eq!(overrides.confidence_threshold, Some(0.5));
        assert_eq!(overrides.max_merge_gap, Some(3.0));
        assert_eq!(overrides.delete_temp_files, Some(false));
        assert_eq!(overrides.save_detect_frames, Some(true));
        assert_eq!(overrides.sampling.map(|s| s.batch_size()), Some(16));
        assert_eq!(overrides.progress, Some(false));
    }
}
