//! Frame sampling policy module
//!
//! Decides which decoded frames are worth sending to the classifier. Two
//! policies exist: an adaptive step that tightens while the target is
//! visible, and a fixed cadence that trades responsiveness for batched
//! inference.

use serde::{Deserialize, Serialize};

use crate::domain::config::config_error;
use crate::error::CatClipResult;

pub mod sampler;

pub use sampler::FrameSampler;

/// How frames are selected for classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum SamplingPolicy {
    /// Skip `floor(step * fps)` frames after each inspection; the step
    /// depends on whether the target was just seen
    #[serde(rename = "adaptive")]
    AdaptiveStep {
        /// Step in seconds after a positive frame
        step_present: f64,
        /// Step in seconds after a negative frame
        step_absent: f64,
    },
    /// Inspect one frame every `step` seconds, classified `batch_size` at a time
    #[serde(rename = "fixed")]
    FixedCadenceBatched { step: f64, batch_size: usize },
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        SamplingPolicy::AdaptiveStep {
            step_present: 1.0,
            step_absent: 0.25,
        }
    }
}

impl SamplingPolicy {
    /// Parse the policy name used on the command line
    pub fn from_name(name: &str) -> CatClipResult<Self> {
        match name.to_lowercase().as_str() {
            "adaptive" => Ok(Self::default()),
            "fixed" => Ok(SamplingPolicy::FixedCadenceBatched {
                step: 0.25,
                batch_size: 16,
            }),
            _ => Err(config_error(format!(
                "Invalid sampling mode: {}. Valid modes: adaptive, fixed",
                name
            ))),
        }
    }

    /// Name of the policy as used in configuration and on the command line
    pub fn mode(&self) -> &'static str {
        match self {
            SamplingPolicy::AdaptiveStep { .. } => "adaptive",
            SamplingPolicy::FixedCadenceBatched { .. } => "fixed",
        }
    }

    /// Number of frames classified per classifier call
    pub fn batch_size(&self) -> usize {
        match self {
            // each decision depends on the previous verdict
            SamplingPolicy::AdaptiveStep { .. } => 1,
            SamplingPolicy::FixedCadenceBatched { batch_size, .. } => *batch_size,
        }
    }

    pub fn validate(&self) -> CatClipResult<()> {
        match *self {
            SamplingPolicy::AdaptiveStep {
                step_present,
                step_absent,
            } => {
                if !(step_present >= 0.0) || !(step_absent >= 0.0) {
                    return Err(config_error(format!(
                        "adaptive steps cannot be negative ({} / {})",
                        step_present, step_absent
                    )));
                }
            }
            SamplingPolicy::FixedCadenceBatched { step, batch_size } => {
                if !(step > 0.0) {
                    return Err(config_error(format!(
                        "fixed cadence step must be positive, got {}",
                        step
                    )));
                }
                if batch_size == 0 {
                    return Err(config_error("batch_size must be at least 1"));
                }
            }
        }
        Ok(())
    }
}
