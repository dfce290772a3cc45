// Domain models - Core types and data structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CatClipError, CatClipResult};

/// One classifier verdict for one inspected frame
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub video_id: String,
    pub timestamp: f64,
    pub present: bool,
}

impl Observation {
    pub fn new(video_id: impl Into<String>, timestamp: f64, present: bool) -> Self {
        Self {
            video_id: video_id.into(),
            timestamp,
            present,
        }
    }
}

/// Closed time range `[start, end]` within one source video, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub video_id: String,
    pub start: f64,
    pub end: f64,
}

/// Interval after expansion and merging, ready for extraction
pub type Fragment = Interval;

impl Interval {
    /// Create a new interval, rejecting empty or inverted ranges
    pub fn new(video_id: impl Into<String>, start: f64, end: f64) -> CatClipResult<Self> {
        let video_id = video_id.into();
        if !start.is_finite() || !end.is_finite() {
            return Err(CatClipError::Format {
                line: 0,
                message: format!("non-finite bounds for {}: {} - {}", video_id, start, end),
            });
        }
        if start >= end {
            return Err(CatClipError::Format {
                line: 0,
                message: format!(
                    "start ({:.2}) must be less than end ({:.2}) for {}",
                    start, end, video_id
                ),
            });
        }
        Ok(Self { video_id, start, end })
    }

    /// Length of the interval in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{:.2} - {:.2}]", self.video_id, self.start, self.end)
    }
}

/// Stream properties read from a video container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub fps: f64,
    pub frame_count: i64,
    /// Total stream duration in seconds
    pub duration: f64,
    pub width: u32,
    pub height: u32,
}

impl VideoMetadata {
    /// Reject metadata the sampler cannot work with
    pub fn validate(&self, video_id: &str) -> CatClipResult<()> {
        if !(self.fps > 0.0) || !self.fps.is_finite() {
            return Err(CatClipError::Metadata {
                video: video_id.to_string(),
                message: format!("frame rate is {}", self.fps),
            });
        }
        if self.frame_count <= 0 {
            return Err(CatClipError::Metadata {
                video: video_id.to_string(),
                message: format!("frame count is {}", self.frame_count),
            });
        }
        Ok(())
    }
}

/// Position of a decoded frame in its stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameHeader {
    /// Zero-based decode index
    pub index: u64,
    /// Presentation time in seconds from stream start
    pub timestamp: f64,
}

/// Packed RGB24 pixels of a selected frame
#[derive(Debug, Clone)]
pub struct FrameImage {
    pub header: FrameHeader,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameImage {
    /// Expected byte length for the frame dimensions
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}
