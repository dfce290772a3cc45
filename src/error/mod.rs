//! Error handling module for CatClip

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for CatClip operations
#[derive(Error, Debug)]
pub enum CatClipError {
    /// Frame rate or frame count of a video could not be read
    #[error("Unreadable video metadata for {video}: {message}")]
    Metadata { video: String, message: String },

    /// Source video referenced by a fragment is gone
    #[error("Source video not found: {}", path.display())]
    SourceMissing { path: PathBuf },

    /// A classifier or media tool call failed
    #[error("{tool} invocation failed: {message}")]
    ToolInvocation { tool: String, message: String },

    /// A required external tool could not be started
    #[error("{tool} is not available: {message}")]
    ToolUnavailable { tool: String, message: String },

    /// Nothing usable was produced by a stage
    #[error("No usable work: {message}")]
    NoUsableWork { message: String },

    /// Malformed row in a persisted table
    #[error("Malformed row at line {line}: {message}")]
    Format { line: usize, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Input directory missing
    #[error("Input directory not found: {}", path.display())]
    InputDirNotFound { path: PathBuf },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// FFmpeg error
    #[error("FFmpeg error: {0}")]
    FFmpegError(#[from] ffmpeg_next::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CatClipError {
    /// Errors that only affect the current video or fragment
    pub fn is_per_item(&self) -> bool {
        matches!(
            self,
            CatClipError::Metadata { .. }
                | CatClipError::SourceMissing { .. }
                | CatClipError::ToolInvocation { .. }
                | CatClipError::Format { .. }
                | CatClipError::FFmpegError(_)
        )
    }

    pub(crate) fn tool(tool: &str, message: impl Into<String>) -> Self {
        CatClipError::ToolInvocation {
            tool: tool.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for CatClip operations
pub type CatClipResult<T> = std::result::Result<T, CatClipError>;
