//! Configuration initialization and hierarchy management
//!
//! Precedence: CLI > Env > File > Defaults. The merged configuration is
//! validated once and then only passed around by reference.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::adapters::TomlConfigAdapter;
use crate::domain::config::{config_error, AppConfig};
use crate::error::CatClipResult;
use crate::planner::SamplingPolicy;

/// Environment variables and the setting each one overrides
pub const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("CATCLIP_INPUT_DIR", "paths.input_dir"),
    ("CATCLIP_OUTPUT_DIR", "paths.output_dir"),
    ("CATCLIP_THRESHOLD", "detection.confidence_threshold"),
    ("CATCLIP_MERGE_GAP", "postprocess.max_merge_gap"),
    ("CATCLIP_MODEL", "detection.model_path"),
    ("CATCLIP_FFMPEG", "splice.ffmpeg"),
];

/// Settings supplied by one layer above the file; `None` leaves the lower
/// layer's value in place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub confidence_threshold: Option<f64>,
    pub max_merge_gap: Option<f64>,
    pub model_path: Option<String>,
    pub ffmpeg: Option<String>,
    pub save_detect_frames: Option<bool>,
    pub sampling: Option<SamplingPolicy>,
    pub delete_temp_files: Option<bool>,
    pub progress: Option<bool>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.input_dir {
            config.paths.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.paths.output_dir = dir.clone();
        }
        if let Some(threshold) = self.confidence_threshold {
            config.detection.confidence_threshold = threshold;
        }
        if let Some(gap) = self.max_merge_gap {
            config.postprocess.max_merge_gap = gap;
        }
        if let Some(model) = &self.model_path {
            config.detection.model_path = model.clone();
        }
        if let Some(ffmpeg) = &self.ffmpeg {
            config.splice.ffmpeg = ffmpeg.clone();
        }
        if let Some(save) = self.save_detect_frames {
            config.detection.save_detect_frames = save;
        }
        if let Some(sampling) = self.sampling {
            // only a mode switch resets the step settings
            if config.detection.sampling.mode() != sampling.mode() {
                config.detection.sampling = sampling;
            }
        }
        if let Some(delete) = self.delete_temp_files {
            config.splice.delete_temp_files = delete;
        }
        if let Some(progress) = self.progress {
            config.display.progress = progress;
        }
    }

    fn count(&self) -> usize {
        [
            self.input_dir.is_some(),
            self.output_dir.is_some(),
            self.confidence_threshold.is_some(),
            self.max_merge_gap.is_some(),
            self.model_path.is_some(),
            self.ffmpeg.is_some(),
            self.save_detect_frames.is_some(),
            self.sampling.is_some(),
            self.delete_temp_files.is_some(),
            self.progress.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

/// Build the run configuration from the process environment
pub fn initialize_configuration(config_file: Option<&Path>, cli: &ConfigOverrides) -> CatClipResult<AppConfig> {
    build_configuration(config_file, |key| std::env::var(key).ok(), cli)
}

/// Build the run configuration with an explicit environment lookup
pub fn build_configuration<F>(config_file: Option<&Path>, env: F, cli: &ConfigOverrides) -> CatClipResult<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    info!("Initializing configuration hierarchy");

    let mut config = match TomlConfigAdapter::discover(config_file) {
        Some(adapter) => {
            info!("Loading configuration from: {}", adapter.path().display());
            adapter.load()?
        }
        None => AppConfig::default(),
    };

    let env_overrides = load_environment_variables(env)?;
    if env_overrides.count() > 0 {
        info!("Applied {} environment variable overrides", env_overrides.count());
    }
    env_overrides.apply(&mut config);

    if cli.count() > 0 {
        info!("Applied {} CLI configuration overrides", cli.count());
    }
    cli.apply(&mut config);

    config.validate()?;
    Ok(config)
}

/// Read the `CATCLIP_*` variables
pub fn load_environment_variables<F>(env: F) -> CatClipResult<ConfigOverrides>
where
    F: Fn(&str) -> Option<String>,
{
    let mut overrides = ConfigOverrides::default();
    for (var, key) in ENV_MAPPINGS {
        let Some(value) = env(var).filter(|v| !v.trim().is_empty()) else {
            continue;
        };
        info!("Found environment override: {} = {}", var, value);
        match *var {
            "CATCLIP_INPUT_DIR" => overrides.input_dir = Some(PathBuf::from(value)),
            "CATCLIP_OUTPUT_DIR" => overrides.output_dir = Some(PathBuf::from(value)),
            "CATCLIP_THRESHOLD" => overrides.confidence_threshold = Some(parse_number(var, key, &value)?),
            "CATCLIP_MERGE_GAP" => overrides.max_merge_gap = Some(parse_number(var, key, &value)?),
            "CATCLIP_MODEL" => overrides.model_path = Some(value),
            "CATCLIP_FFMPEG" => overrides.ffmpeg = Some(value),
            _ => {}
        }
    }
    Ok(overrides)
}

fn parse_number(var: &str, key: &str, value: &str) -> CatClipResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| config_error(format!("{} ({}) must be a number, got '{}'", var, key, value)))
}
