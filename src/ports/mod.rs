// Ports - Interface definitions (contracts)
//
// Every port is synchronous: the pipeline runs one video and one subprocess
// at a time.

use std::path::{Path, PathBuf};

use crate::domain::model::{FrameHeader, FrameImage, VideoMetadata};
use crate::error::CatClipResult;

/// Port for sequential frame decoding of one video
pub trait FrameSource {
    /// Stream properties read from the container
    fn metadata(&self) -> &VideoMetadata;

    /// Decode the next frame and return its position, `None` at end of stream
    fn next_frame(&mut self) -> CatClipResult<Option<FrameHeader>>;

    /// Pixels of the frame most recently returned by `next_frame`
    fn current_image(&mut self) -> CatClipResult<FrameImage>;
}

/// Port for opening videos as frame sources
pub trait VideoOpener {
    fn open(&self, path: &Path) -> CatClipResult<Box<dyn FrameSource>>;
}

/// Port for the object-detection capability
pub trait Classifier {
    /// One verdict per frame, in input order
    fn classify(&mut self, frames: &[FrameImage]) -> CatClipResult<Vec<bool>>;
}

/// Extraction method offered by the media tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Method {
    /// Lossless, keyframe-aligned, fast
    StreamCopy,
    /// Exact boundaries at encoding cost
    Reencode,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::StreamCopy => write!(f, "stream-copy"),
            Method::Reencode => write!(f, "re-encode"),
        }
    }
}

/// Result of one media tool invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Succeeded { output_path: PathBuf },
    Failed { stderr: String },
}

impl ToolOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Succeeded { .. })
    }
}

/// Port for the external media tool
pub trait MediaTool {
    /// Check that the tool can be launched
    fn check_available(&self) -> CatClipResult<()>;

    /// Cut `[start, end]` of `source` into `dest`; `end` past the source
    /// duration is clamped by the tool
    fn cut(&self, source: &Path, start: f64, end: f64, dest: &Path, method: Method) -> ToolOutcome;

    /// Join `clips` in order into `dest`
    fn concat(&self, clips: &[PathBuf], dest: &Path, method: Method) -> ToolOutcome;

    /// Write a single still frame of `source` at `at` seconds
    fn snapshot(&self, source: &Path, at: f64, dest: &Path) -> ToolOutcome;
}
