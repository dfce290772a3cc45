// Application configuration - immutable settings shared by every stage

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CatClipError, CatClipResult};
use crate::planner::SamplingPolicy;

/// Complete configuration for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub detection: DetectionConfig,
    pub postprocess: PostProcessConfig,
    pub splice: SpliceConfig,
    pub display: DisplayConfig,
}

/// Input/output locations and artifact names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Work directory created under `output_dir`
    pub work_dir_name: String,
    pub timestamps_name: String,
    pub merged_timestamps_name: String,
    pub processed_log_name: String,
    pub final_video_name: String,
    /// Lowercase extensions without the leading dot
    pub video_extensions: Vec<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            work_dir_name: ".tmp_catclipper".to_string(),
            timestamps_name: "cat_timestamps.csv".to_string(),
            merged_timestamps_name: "cat_timestamps_merged.csv".to_string(),
            processed_log_name: "processed_videos.txt".to_string(),
            final_video_name: "output.mp4".to_string(),
            video_extensions: ["mp4", "avi", "mov", "mkv"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Detection stage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectionConfig {
    /// Detector program followed by its arguments
    pub detector_command: Vec<String>,
    /// Model weights handed to the detector
    pub model_path: String,
    pub confidence_threshold: f64,
    /// Class ids counted as the target (15 is "cat" in COCO)
    pub target_classes: Vec<u32>,
    /// Shortest interval kept; `None` keeps everything
    pub min_duration: Option<f64>,
    /// Frames wider than this are downscaled before classification
    pub inference_width: u32,
    /// Write a still at every interval start and end
    pub save_detect_frames: bool,
    pub sampling: SamplingPolicy,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            detector_command: vec!["catclip-detector".to_string()],
            model_path: "yolo11n.pt".to_string(),
            confidence_threshold: 0.6,
            target_classes: vec![15],
            min_duration: Some(1.0),
            inference_width: 640,
            save_detect_frames: false,
            sampling: SamplingPolicy::default(),
        }
    }
}

/// Interval expansion and merge settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostProcessConfig {
    pub pre_margin: f64,
    pub post_margin: f64,
    /// Neighbouring intervals closer than this (inclusive) are merged
    pub max_merge_gap: f64,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            pre_margin: 2.0,
            post_margin: 2.0,
            max_merge_gap: 5.0,
        }
    }
}

/// Cut and concatenation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpliceConfig {
    /// ffmpeg executable name or path
    pub ffmpeg: String,
    pub video_codec: String,
    pub audio_codec: String,
    pub crf: u8,
    pub preset: String,
    /// Remove the work directory after a successful run
    pub delete_temp_files: bool,
}

impl Default for SpliceConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            crf: 23,
            preset: "medium".to_string(),
            delete_temp_files: true,
        }
    }
}

/// Terminal output settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Draw progress bars for scans and cuts
    pub progress: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { progress: true }
    }
}

impl AppConfig {
    /// Check value ranges across all sections
    pub fn validate(&self) -> CatClipResult<()> {
        let detection = &self.detection;
        if !(0.0..=1.0).contains(&detection.confidence_threshold) {
            return Err(config_error(format!(
                "confidence_threshold must be within 0..=1, got {}",
                detection.confidence_threshold
            )));
        }
        if detection.target_classes.is_empty() {
            return Err(config_error("target_classes must not be empty"));
        }
        if detection.detector_command.is_empty() {
            return Err(config_error("detector_command must name a program"));
        }
        if let Some(min) = detection.min_duration {
            if !(min >= 0.0) {
                return Err(config_error(format!("min_duration cannot be negative, got {}", min)));
            }
        }
        if detection.inference_width == 0 {
            return Err(config_error("inference_width must be positive"));
        }
        detection.sampling.validate()?;

        let post = &self.postprocess;
        for (name, value) in [
            ("pre_margin", post.pre_margin),
            ("post_margin", post.post_margin),
            ("max_merge_gap", post.max_merge_gap),
        ] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(config_error(format!("{} must be a non-negative number, got {}", name, value)));
            }
        }

        if self.splice.crf > 51 {
            return Err(config_error(format!(
                "CRF value {} is invalid (must be 0-51)",
                self.splice.crf
            )));
        }
        if self.paths.video_extensions.is_empty() {
            return Err(config_error("video_extensions must not be empty"));
        }
        Ok(())
    }
}

pub(crate) fn config_error(message: impl Into<String>) -> CatClipError {
    CatClipError::Config {
        message: message.into(),
    }
}
