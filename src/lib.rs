//! CatClip library
//!
//! Finds the time intervals in surveillance videos where a cat appears and
//! splices them into one highlight video with lossless stream copy and
//! re-encode fallback.
//!
//! Layers: `domain` holds the pure interval logic, `ports` the collaborator
//! traits, `adapters` their libav, detector-process and ffmpeg
//! implementations, and `app` the stage interactors.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod output;
pub mod planner;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::config::AppConfig;
pub use domain::model::{Fragment, Interval, Observation, VideoMetadata};
pub use error::{CatClipError, CatClipResult};
